//! Declarative form filling.
//!
//! Demonstrates:
//! - Building a FormPlan (or loading one from JSON)
//! - Applying it to a local form page
//! - Screenshot before submit, then submitting
//!
//! Expects a form served locally, e.g. with a live-server on port 5500.
//!
//! Usage:
//!   cargo run --example 02_form_autofill
//!   cargo run --example 02_form_autofill -- --headful

mod common;

// ============================================================================
// Imports
// ============================================================================

use common::Args;
use multipage::{FormPlan, Result, Session, SessionConfig};

// ============================================================================
// Constants
// ============================================================================

const FORM_URL: &str = "http://127.0.0.1:5500/form.html";
const SUBMIT_SELECTOR: &str = "button[type='submit']";

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

fn sample_plans() -> Vec<FormPlan> {
    vec![
        FormPlan::new()
            .with_text("#username", "zhangsan")
            .with_text("#email", "zhangsan@example.com")
            .with_text("#phone", "13800138000")
            .with_textarea("#comments", "first sample record")
            .with_checkbox("#newsletter", true)
            .with_checkbox("#agree_terms", true)
            .with_radio("#gender_male")
            .with_dropdown("#country", "China"),
        FormPlan::new()
            .with_text("#username", "lisi")
            .with_text("#email", "lisi@example.com")
            .with_checkbox("#newsletter", false)
            .with_checkbox("#agree_terms", true)
            .with_radio("#gender_female")
            .with_dropdown("#country", "China"),
    ]
}

async fn run(args: Args) -> Result<()> {
    println!("=== 02: Form Autofill ===\n");

    let mut config = SessionConfig::new().with_timeout_ms(15_000);
    if !args.headful {
        config = config.with_headless();
    }

    let mut session = Session::open(config).await?;
    let plans = sample_plans();
    println!("[Setup] {} records to submit\n", plans.len());

    for (i, plan) in plans.iter().enumerate() {
        println!("[{}] Filling {} fields...", i + 1, plan.field_count());

        session.goto(FORM_URL).await?;
        session.wait_for_selector("#username", None).await?;

        // A failing record is logged and skipped; the batch continues.
        if let Err(e) = session.fill_form(plan).await {
            eprintln!("    ✗ record {} failed: {e}", i + 1);
            continue;
        }

        session.screenshot(format!("before_submission_{}.png", i + 1)).await?;
        session.click(SUBMIT_SELECTOR).await?;
        println!("    ✓ submitted");
    }

    session.close().await?;
    println!("\n✓ Done");
    Ok(())
}
