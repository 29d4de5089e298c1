//! Wealthpress CLI - command-line interface for the content service
//!
//! Use this for scripting, previewing feeds and the sitemap, managing
//! newsletter subscribers, or running the server.
//!
//! # Examples
//!
//! ```bash
//! # Search everything
//! wealthpress search "fiduciary rule"
//!
//! # Dropdown-style grouped results
//! wealthpress search crm --grouped
//!
//! # Category feed
//! wealthpress feed --category compliance
//!
//! # Subscribe an address
//! wealthpress subscribe advisor@firm.com --source footer
//! ```

use clap::Parser;
use wealthpress::cli::{output, run, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}
