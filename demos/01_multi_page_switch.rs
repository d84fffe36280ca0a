//! Multi-page switching walkthrough.
//!
//! Demonstrates:
//! - Lazy session launch with a tagged "default" page
//! - Opening tagged pages and navigating them directly
//! - Listing pages with their tags
//! - Switching the current page by tag and by index
//! - Closing a page and watching the current pointer move
//!
//! Usage:
//!   cargo run --example 01_multi_page_switch
//!   cargo run --example 01_multi_page_switch -- --headful --debug

mod common;

// ============================================================================
// Imports
// ============================================================================

use common::Args;
use multipage::{PageQuery, Result, Session, SessionConfig};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    let args = Args::parse();
    common::init_logging(args.debug);

    if let Err(e) = run(args).await {
        eprintln!("\n[ERROR] {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    println!("=== 01: Multi-Page Switching ===\n");

    let mut config = SessionConfig::new().with_timeout_ms(20_000);
    if !args.headful {
        config = config.with_headless();
    }

    // ========================================================================
    // Open Session
    // ========================================================================

    println!("[1] Opening session (default page)...");
    let mut session = Session::open(config).await?;
    session.goto("https://example.com").await?;
    println!("    ✓ {:?}\n", session.current_page_info().await?);

    // ========================================================================
    // Open Tagged Pages
    // ========================================================================

    println!("[2] Opening tagged pages...");
    let docs = session.open_new_page("docs").await?;
    docs.goto("https://www.rust-lang.org/learn").await?;

    let crates = session.open_new_page("crates").await?;
    crates.goto("https://crates.io").await?;
    println!("    ✓ 'docs' and 'crates' pages open\n");

    // ========================================================================
    // List Pages
    // ========================================================================

    println!("[3] All pages:");
    for listing in session.list_pages().await? {
        println!("    {listing}");
    }
    println!();

    // ========================================================================
    // Switch Around
    // ========================================================================

    println!("[4] Switching by tag 'docs'...");
    session.switch_page(&PageQuery::tag("docs")).await?;
    println!("    ✓ {:?}", session.current_page_info().await?);

    println!("[5] Switching by index 2...");
    session.switch_page(&PageQuery::index(2)).await?;
    println!("    ✓ {:?}\n", session.current_page_info().await?);

    // ========================================================================
    // Close the Default Page
    // ========================================================================

    println!("[6] Closing the 'default' page...");
    session.close_page(&PageQuery::tag("default")).await?;
    for listing in session.list_pages().await? {
        println!("    {listing}");
    }

    // ========================================================================
    // Teardown
    // ========================================================================

    session.close().await?;
    println!("\n✓ Done");
    Ok(())
}
