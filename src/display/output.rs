use crate::analysis::roles::Role;
use crate::analysis::PassReport;
use crate::storage::SuggestionRecord;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct SuggestionRow {
    #[tabled(rename = "#")]
    rank: String,
    role: String,
    pick: String,
    team: String,
    enemies: String,
    confidence: String,
}

#[derive(Tabled)]
struct ReportRow {
    metric: String,
    value: String,
}

pub fn display_suggestions(records: &[SuggestionRecord], title: &str) {
    println!("\n{}", format!("🧩 {}", title).bold().cyan());
    println!("{}\n", "=".repeat(80).cyan());

    if records.is_empty() {
        println!("{}", "No composition suggestions available".yellow());
        return;
    }

    let rows: Vec<SuggestionRow> = records
        .iter()
        .map(|record| SuggestionRow {
            rank: format!("#{}", record.rank),
            role: role_label(&record.role),
            pick: record.suggested_champion.clone(),
            team: record.team_champions.join(", "),
            enemies: record.enemy_champions.join(", "),
            confidence: format!("{:.1}%", record.confidence * 100.0),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    if let Some(top) = records.first() {
        println!("\n{}", "Top Suggestion".bold().yellow());
        println!(
            "  {} as {} ({:.1}% confidence)",
            top.suggested_champion.bold(),
            role_label(&top.role),
            top.confidence * 100.0
        );
        if let Some(reasoning) = &top.reasoning {
            println!("  {}", reasoning);
        }
        if let Some(strengths) = &top.strengths {
            println!("  {} {}", "+".green(), strengths);
        }
    }

    println!();
}

pub fn display_pass_report(report: &PassReport) {
    println!("\n{}", "📊 AGGREGATION PASS".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    let unknown = if report.unknown_champions > 0 {
        report.unknown_champions.to_string().yellow().to_string()
    } else {
        report.unknown_champions.to_string()
    };

    let rows = vec![
        report_row("Rows scored", report.rows_scored.to_string()),
        report_row("Unknown champions (scored 0.0)", unknown),
        report_row("Complete team groups", report.complete_groups.to_string()),
        report_row("Incomplete groups dropped", report.incomplete_groups.to_string()),
        report_row("Unresolved rosters dropped", report.unresolved_groups.to_string()),
        report_row("Distinct team/role keys", report.distinct_keys.to_string()),
        report_row(
            "Duplicates replaced / kept",
            format!("{} / {}", report.replaced, report.kept),
        ),
        report_row("Suggestions emitted", report.emitted.to_string().green().to_string()),
    ];

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

fn report_row(metric: &str, value: String) -> ReportRow {
    ReportRow {
        metric: metric.to_string(),
        value,
    }
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn display_warning(message: &str) {
    println!("{} {}", "⚠️".yellow(), message);
}

fn role_label(role: &str) -> String {
    Role::parse(role)
        .map(|r| r.display_label().to_string())
        .unwrap_or_else(|| role.to_string())
}
