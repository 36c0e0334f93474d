use clap::{Parser, Subcommand};
use site::state::State;
use site::{forms, pages};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Runs one page flow against the configured backend and prints the
/// resulting document.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    page: Page,
}

#[derive(Subcommand, Debug)]
enum Page {
    /// Vending machine listing with role-gated feedback forms.
    Machines {
        /// Also load the feedback lists for this machine.
        #[arg(long)]
        select: Option<i64>,
    },
    /// Stock levels across all machines.
    Stock,
    /// Aggregated stock report.
    Report,
    /// Products stocked by one machine.
    Profile { id: i64 },
    /// Customer storefront with buy widgets.
    Shop,
    /// Current user's bio.
    User,
    /// Navigation menu with owner-only links.
    Menu,
    /// Locally stored comments.
    Comments,
    /// Submit a comment to the local store.
    Comment {
        #[arg(long)]
        user: String,
        #[arg(long)]
        text: String,
    },
    /// Locally stored complaints, manager table.
    Complaints,
    /// Submit a complaint to the local store.
    Complain {
        #[arg(long, default_value = "")]
        user_id: String,
        #[arg(long)]
        text: String,
    },
    /// Detail view of one product record.
    Product { id: String },
}

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();
    let state = State::new();
    info!("Using backend {}", state.config.base_url);

    let doc = match args.page {
        Page::Machines { select } => {
            let mut doc = pages::machines_document();
            pages::machines_page(&state, &mut doc).await;
            if let Some(vm_id) = select {
                pages::select_machine(&state, &mut doc, vm_id).await;
            }
            doc
        }
        Page::Stock => {
            let mut doc = pages::stock_document();
            pages::stock_page(&state, &mut doc).await;
            doc
        }
        Page::Report => {
            let mut doc = pages::report_document();
            pages::report_page(&state, &mut doc).await;
            doc
        }
        Page::Profile { id } => {
            let mut doc = pages::profile_document();
            pages::machine_profile_page(&state, &mut doc, id).await;
            doc
        }
        Page::Shop => {
            let mut doc = pages::profile_document();
            pages::shop_page(&state, &mut doc).await;
            doc
        }
        Page::User => {
            let mut doc = pages::user_document();
            pages::user_page(&state, &mut doc).await;
            doc
        }
        Page::Menu => {
            let mut doc = pages::menu_document();
            pages::menu_page(&state, &mut doc).await;
            doc
        }
        Page::Comments => {
            let mut doc = pages::comments_document();
            pages::comments_page(&mut doc, &state.storage);
            doc
        }
        Page::Comment { user, text } => {
            let mut doc = pages::comments_document();
            pages::comments_page(&mut doc, &state.storage);
            doc.set_input("user", &user);
            doc.set_input("comment_text", &text);
            forms::submit_comment(&mut doc, &state.storage);
            doc
        }
        Page::Complaints => {
            let mut doc = pages::complaints_manager_document();
            pages::complaints_manager_page(&mut doc, &state.storage);
            doc
        }
        Page::Complain { user_id, text } => {
            let mut doc = pages::complaints_document();
            doc.set_input("user_id", &user_id);
            doc.set_input("complaint_text", &text);
            forms::submit_complaint(&mut doc, &state.storage);
            doc
        }
        Page::Product { id } => {
            let mut doc = pages::product_document();
            pages::product_page(&state, &mut doc, &id).await;
            doc
        }
    };

    print!("{doc}");
}
