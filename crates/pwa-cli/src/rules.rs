//! # Rules Subcommand
//!
//! Prints the standard catalog in evaluation order.

use anyhow::Result;
use pwa_core::Category;
use pwa_validation::{standard_catalog, Rule};
use serde::Serialize;

use crate::config::{OutputFormat, StudioConfig};
use crate::EXIT_OK;

/// Serializable view of a [`Rule`].
#[derive(Debug, Serialize)]
pub struct RuleSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_name: Option<&'static str>,
    pub category: Category,
    pub display_string: &'static str,
    pub error_string: &'static str,
    pub has_default: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_link: Option<&'static str>,
}

impl From<&Rule> for RuleSummary {
    fn from(rule: &Rule) -> Self {
        Self {
            member: rule.member,
            test_name: rule.test_name,
            category: rule.category,
            display_string: rule.display_string,
            error_string: rule.error_string,
            has_default: rule.default_value.is_some(),
            docs_link: rule.docs_link,
        }
    }
}

/// Execute the rules subcommand.
pub fn run_rules(config: &StudioConfig) -> Result<u8> {
    let summaries: Vec<RuleSummary> = standard_catalog().rules().iter().map(RuleSummary::from).collect();
    match config.format {
        OutputFormat::Text => {
            for s in &summaries {
                let key = match (s.member, s.test_name) {
                    (Some(member), Some(test)) => format!("{member}/{test}"),
                    (Some(member), None) => member.to_string(),
                    (None, test) => test.unwrap_or("(document)").to_string(),
                };
                println!("  {:<11} {key:<24} {}", s.category.as_str(), s.display_string);
            }
            println!();
            println!("Total: {} rules", summaries.len());
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
    }
    Ok(EXIT_OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_mirrors_rule() {
        let rule = &standard_catalog().rules()[2];
        let summary = RuleSummary::from(rule);
        assert_eq!(summary.member, Some("name"));
        assert_eq!(summary.test_name, Some("whitespace"));
        assert_eq!(summary.category, Category::Required);
        assert!(!summary.has_default);
    }

    #[test]
    fn summaries_serialize() {
        let summaries: Vec<RuleSummary> = standard_catalog().rules().iter().map(RuleSummary::from).collect();
        let json = serde_json::to_value(&summaries).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 22);
        assert_eq!(json[0]["member"], "icons");
        assert_eq!(json[0]["has_default"], true);
        assert!(json[0].get("test_name").is_none());
    }

    #[test]
    fn run_rules_succeeds() {
        assert_eq!(run_rules(&StudioConfig::default()).unwrap(), EXIT_OK);
    }
}
