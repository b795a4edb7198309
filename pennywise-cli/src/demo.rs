//! `pennywise demo`: run a whole month through the pipeline and print each stage.

use pennywise_core::{BudgetLimit, Category, Session};
use pennywise_finance::FinancialSummary;
use pennywise_ingest::IngestReport;

const QUESTIONS: &[&str] = &[
    "Show budget status",
    "Top expenses",
    "Give me insights",
];

pub fn run_demo(session: &mut Session, report: IngestReport) {
    let settings = session.settings().clone();
    let ledger = session.ledger();

    println!("# Pennywise demo\n");
    println!(
        "Loaded {} transactions ({} duplicates removed)\n",
        report.loaded, report.duplicates_removed
    );

    println!("## Categories\n");
    for c in Category::ALL {
        let count = ledger.transactions().iter().filter(|t| t.category == c).count();
        if count > 0 {
            println!("  {:<16} {} transactions", c.label(), count);
        }
    }

    println!("\n## Budget\n");
    println!(
        "  {:<16} {:>10} {:>10} {:>10} {:>12}",
        "Category", "Spent", "Limit", "Status", "Remaining"
    );
    for s in session.statuses() {
        let BudgetLimit::Bounded(limit) = s.limit else {
            continue;
        };
        let remaining = s.remaining.unwrap_or_default();
        println!(
            "  {:<16} {:>10} {:>10} {:>10} {:>12}",
            s.category.label(),
            settings.money(s.spent),
            settings.money(limit),
            format!("{} {}", s.tier.icon(), s.tier.label()),
            settings.money(remaining)
        );
    }

    let summary = FinancialSummary::from_session(session);
    println!("\n## Summary\n");
    println!("  Total income:   {}", settings.money(summary.total_income));
    println!("  Total expenses: {}", settings.money(summary.total_expenses));
    println!("  Net savings:    {}", settings.money(summary.net_savings));
    match summary.expense_ratio {
        Some(r) => println!("  Expense ratio:  {:.1}%", r),
        None => println!("  Expense ratio:  n/a (no income)"),
    }

    println!("\n## Top categories\n");
    for (i, c) in summary.top_categories.iter().enumerate() {
        println!(
            "  {}. {:<16} {:>10}  ({:.1}%)",
            i + 1,
            c.category.label(),
            settings.money(c.spent),
            c.share_pct
        );
    }

    println!("\n## Chat\n");
    for q in QUESTIONS {
        println!("> {q}");
        println!("{}\n", session.respond(q).trim_end());
    }
}
