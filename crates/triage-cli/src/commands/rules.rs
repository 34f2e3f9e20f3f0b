//! `triage rules`: print the effective rule table.

use triage_classification::{ClassificationRule, RuleKind};

use crate::cli::RulesArgs;

pub fn run(args: &RulesArgs) -> anyhow::Result<()> {
    let (_, engine) = super::build_engine(&args.rule_options, &args.rule_options.overrides())?;
    if engine.rules().is_empty() {
        println!("no rules configured: every issue classifies as uncategorized");
        return Ok(());
    }
    println!(
        "{:<24} {:<10} {:<14} {:<9} {:>5}  match",
        "id", "kind", "category", "priority", "score"
    );
    for rule in engine.rules() {
        println!("{}", format_rule(rule));
    }
    Ok(())
}

/// One table row per rule.
pub fn format_rule(rule: &ClassificationRule) -> String {
    format!(
        "{:<24} {:<10} {:<14} {:<9} {:>5}  {}",
        rule.id,
        rule.kind.name(),
        rule.category,
        rule.priority,
        rule.score,
        describe(&rule.kind)
    )
}

fn describe(kind: &RuleKind) -> String {
    match kind {
        RuleKind::Keyword { keywords, fields } => format!("{fields:?}: {}", keywords.join(", ")),
        RuleKind::Label { labels } => labels.join(", "),
        RuleKind::Staleness { days } => format!("open, idle >= {days}d"),
        RuleKind::Pattern { regex, fields } => format!("{fields:?}: /{}/", regex.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use triage_classification::RuleSet;

    use super::*;

    #[test]
    fn rows_name_the_rule_and_its_match() {
        let rules = RuleSet::default_rules();
        let stale = rules.get("stale").unwrap();
        let row = format_rule(stale);
        assert!(row.starts_with("stale"));
        assert!(row.contains("staleness"));
        assert!(row.contains("idle >= 60d"));
    }
}
