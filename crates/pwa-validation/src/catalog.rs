//! # Rule Catalog
//!
//! The single, canonical list of manifest checks. Catalog order is an
//! observable contract: the engine emits one result per rule in exactly
//! this order, and diagnostics renderers match results to source
//! locations by it.
//!
//! ## Standard catalog
//!
//! | member | test | category | passes when | default |
//! |--------|------|----------|-------------|---------|
//! | icons | | required | non-empty array | 192px + 512px PNG |
//! | name | | required | non-empty string | `placeholder name` |
//! | name | whitespace | required | equals its trimmed form | |
//! | short_name | | required | non-empty, trimmed string | `placeholder` |
//! | short_name | whitespace | required | equals its trimmed form | |
//! | start_url | | required | non-empty string | `/` |
//! | display | | required | standard display mode | `standalone` |
//! | background_color | | required | `#RGB` / `#RRGGBB` | `#000000` |
//! | theme_color | | required | `#RGB` / `#RRGGBB` | `#000000` |
//! | orientation | | recommended | standard orientation | `any` |
//! | screenshots | | recommended | non-empty array | 3 samples |
//! | shortcuts | | recommended | non-empty array, no WebP icons | |
//! | iarc_rating_id | | optional | present | `""` |
//! | related_applications | | optional | present | `[]` |
//! | lang | | optional | non-empty string | `en-US` |
//! | dir | | optional | present | `ltr` |
//! | description | | optional | non-empty string | `""` |
//! | description | whitespace | optional | equals its trimmed form | |
//! | protocol_handlers | | optional | present | `[]` |
//! | display_override | | optional | present | `[]` |
//! | icons | type | recommended | every icon has `type` | |
//! | icons | sizes | recommended | every icon has `sizes` | |
//!
//! The `description` whitespace check shares the `optional` severity of
//! the `description` member, so a manifest without a description can
//! still be packaged.

use std::collections::HashSet;
use std::sync::OnceLock;

use pwa_core::Category;
use serde_json::{json, Value};
use thiserror::Error;

use crate::predicates;
use crate::rule::{Check, Rule};

/// Error building a catalog from caller-supplied rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two rules share the same `(member, test_name)` pair.
    #[error("duplicate rule for member {member:?} test {test_name:?}")]
    DuplicateRule {
        /// Member of the duplicated rule.
        member: Option<String>,
        /// Test name of the duplicated rule.
        test_name: Option<String>,
    },

    /// A rule without a member must use a whole-document predicate.
    #[error("rule {test_name:?} has no member but does not inspect the whole document")]
    MemberlessRule {
        /// Test name of the offending rule.
        test_name: Option<String>,
    },

    /// A whole-document predicate was attached to a member rule.
    #[error("rule for member {member:?} uses a whole-document predicate")]
    DocumentCheckOnMember {
        /// Member of the offending rule.
        member: String,
    },
}

/// An ordered list of rules with unique `(member, test_name)` keys.
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    rules: Vec<Rule>,
}

impl RuleCatalog {
    /// Build a catalog, checking the key-uniqueness invariant.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateRule`] on a repeated
    /// `(member, test_name)` pair and [`CatalogError::MemberlessRule`] /
    /// [`CatalogError::DocumentCheckOnMember`] when a rule's member and
    /// check kind disagree.
    pub fn new(rules: Vec<Rule>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            match (rule.member, &rule.check) {
                (None, Check::Document(_)) | (Some(_), Check::Presence | Check::Member(_)) => {}
                (None, _) => {
                    return Err(CatalogError::MemberlessRule {
                        test_name: rule.test_name.map(str::to_string),
                    })
                }
                (Some(member), Check::Document(_)) => {
                    return Err(CatalogError::DocumentCheckOnMember {
                        member: member.to_string(),
                    })
                }
            }
            if !seen.insert(rule.key()) {
                return Err(CatalogError::DuplicateRule {
                    member: rule.member.map(str::to_string),
                    test_name: rule.test_name.map(str::to_string),
                });
            }
        }
        Ok(Self { rules })
    }

    /// The standard PWA manifest catalog.
    pub fn standard() -> Self {
        Self {
            rules: standard_rules(),
        }
    }

    /// All rules, in catalog order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the catalog has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules that inspect `member`, in catalog order.
    pub fn rules_for<'a>(&'a self, member: &'a str) -> impl Iterator<Item = &'a Rule> + 'a {
        self.rules.iter().filter(move |r| r.member == Some(member))
    }

    /// Distinct members the catalog inspects, in first-seen order.
    pub fn members(&self) -> Vec<&'static str> {
        let mut seen = HashSet::new();
        self.rules
            .iter()
            .filter_map(|r| r.member)
            .filter(|m| seen.insert(*m))
            .collect()
    }

    /// Category of a member, taken from the first rule that inspects it.
    pub fn category_of(&self, member: &str) -> Option<Category> {
        self.rules_for(member).next().map(|r| r.category)
    }

    /// Members whose primary rule has the given category.
    pub fn members_in(&self, category: Category) -> Vec<&'static str> {
        self.members()
            .into_iter()
            .filter(|m| self.category_of(m) == Some(category))
            .collect()
    }

    pub fn required_members(&self) -> Vec<&'static str> {
        self.members_in(Category::Required)
    }

    pub fn recommended_members(&self) -> Vec<&'static str> {
        self.members_in(Category::Recommended)
    }

    pub fn optional_members(&self) -> Vec<&'static str> {
        self.members_in(Category::Optional)
    }

    /// Value to insert when `member` is absent, from the first rule for
    /// that member that carries a default.
    pub fn default_for(&self, member: &str) -> Option<Value> {
        self.rules_for(member).find_map(Rule::make_default)
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// The standard catalog, built once per process.
pub fn standard_catalog() -> &'static RuleCatalog {
    static CATALOG: OnceLock<RuleCatalog> = OnceLock::new();
    CATALOG.get_or_init(RuleCatalog::standard)
}

fn standard_rules() -> Vec<Rule> {
    use Category::{Optional, Recommended, Required};
    use Check::{Member, Presence};

    vec![
        Rule::member("icons", Required, Member(predicates::is_non_empty_array))
            .with_default(default_icons)
            .with_error("icons should be an array with a length > 0")
            .with_display("Lists icons for add to home screen")
            .with_info("The icons member specifies an array of objects representing image files that can serve as application icons for different contexts.")
            .with_docs("https://developer.mozilla.org/en-US/docs/Web/Manifest/icons"),
        Rule::member("name", Required, Member(predicates::is_non_empty_string))
            .with_default(|| json!("placeholder name"))
            .with_error("name is required and should be a string with a length > 0")
            .with_display("Contains name property")
            .with_info("The name member is a string that represents the name of the web application as it is usually displayed to the user (e.g., amongst a list of other applications, or as a label for an icon).")
            .with_docs("https://developer.mozilla.org/en-US/docs/Web/Manifest/name"),
        Rule::member("name", Required, Member(predicates::trimmed_fix))
            .with_test_name("whitespace")
            .with_error("name should not have any leading or trailing whitespace")
            .with_display("name has no leading or trailing whitespace"),
        Rule::member("short_name", Required, Member(predicates::is_trimmed_non_empty_string))
            .with_default(|| json!("placeholder"))
            .with_error("short_name is required and should be a string with a length > 0 and should not have any whitespace")
            .with_display("Contains short_name property")
            .with_info("The short_name member is a string that represents the name of the web application displayed to the user if there is not enough space to display name. This name will show in the start menu on Windows and the homescreen on Android.")
            .with_docs("https://developer.mozilla.org/en-US/docs/Web/Manifest/short_name"),
        Rule::member("short_name", Required, Member(predicates::trimmed_fix))
            .with_test_name("whitespace")
            .with_error("short_name should not have any leading or trailing whitespace")
            .with_display("short_name has no leading or trailing whitespace"),
        Rule::member("start_url", Required, Member(predicates::is_non_empty_string))
            .with_default(|| json!("/"))
            .with_error("start_url is required and should be a string with a length > 0")
            .with_display("Designates a start_url")
            .with_info("The start_url member is a string that represents the start URL of the web application, the preferred URL that should be loaded when the user launches the web application.")
            .with_docs("https://developer.mozilla.org/en-US/docs/Web/Manifest/start_url"),
        Rule::member("display", Required, Member(predicates::is_standard_display))
            .with_default(|| json!("standalone"))
            .with_error("display is required and should be either fullscreen, standalone, minimal-ui, browser")
            .with_display("Specifies a display mode")
            .with_info("The display member is a string that determines the developers' preferred display mode for the website. The display mode changes how much of browser UI is shown to the user and can range from browser (when the full browser window is shown) to fullscreen (when the app is fullscreened).")
            .with_docs("https://developer.mozilla.org/en-US/docs/Web/Manifest/display"),
        Rule::member("background_color", Required, Member(predicates::is_hex_color))
            .with_default(|| json!("#000000"))
            .with_error("background_color is required and should be a valid hex color")
            .with_display("Has a background color")
            .with_info("The background_color member defines a placeholder background color for the application page to display before its stylesheet is loaded.")
            .with_docs("https://developer.mozilla.org/en-US/docs/Web/Manifest/background_color"),
        Rule::member("theme_color", Required, Member(predicates::is_hex_color))
            .with_default(|| json!("#000000"))
            .with_error("theme_color is required and should be a valid hex color")
            .with_display("Has a theme color")
            .with_info("The theme_color member is a string that defines the default theme color for the application.")
            .with_docs("https://developer.mozilla.org/en-US/docs/Web/Manifest/theme_color"),
        Rule::member("orientation", Recommended, Member(predicates::is_standard_orientation))
            .with_default(|| json!("any"))
            .with_error("orientation should be either any, natural, landscape, landscape-primary, landscape-secondary, portrait, portrait-primary, portrait-secondary")
            .with_display("Specifies an orientation mode")
            .with_info("The orientation member sets the default orientation of the app, for example portrait or landscape.")
            .with_docs("https://developer.mozilla.org/en-US/docs/Web/Manifest/orientation"),
        Rule::member("screenshots", Recommended, Member(predicates::is_non_empty_array))
            .with_default(default_screenshots)
            .with_error("screenshots should be an array with a length > 0")
            .with_display("Contains screenshots for app store listings")
            .with_info("The screenshots member defines an array of screenshots intended to showcase the application.")
            .with_docs("https://developer.mozilla.org/en-US/docs/Web/Manifest/screenshots"),
        Rule::member("shortcuts", Recommended, Member(predicates::shortcuts_without_webp))
            .with_error("shortcuts should be an array with a length > 0 and should not include webp images")
            .with_display("Lists shortcuts for quick access")
            .with_info("The shortcuts member defines an array of shortcuts or links to key tasks or pages within a web app. Shortcuts will show as jumplists on Windows and on the home screen on Android.")
            .with_docs("https://developer.mozilla.org/en-US/docs/Web/Manifest/shortcuts"),
        Rule::member("iarc_rating_id", Optional, Presence)
            .with_default(|| json!(""))
            .with_error("iarc_rating_id should be set to the IARC certification code of the app")
            .with_display("Contains an IARC ID")
            .with_info("The iarc_rating_id member is a string that represents the International Age Rating Coalition (IARC) certification code of the web application. It is intended to be used to determine which ages the web application is appropriate for.")
            .with_docs("https://developer.mozilla.org/en-US/docs/Web/Manifest/iarc_rating_id"),
        Rule::member("related_applications", Optional, Presence)
            .with_default(|| json!([]))
            .with_error("related_applications should list the native applications related to this app")
            .with_display("Specifies related_applications")
            .with_info("The related_applications member is an array of objects specifying native applications that are installable by, or accessible to, the underlying platform.")
            .with_docs("https://developer.mozilla.org/en-US/docs/Web/Manifest/related_applications"),
        Rule::member("lang", Optional, Member(predicates::is_non_empty_string))
            .with_default(|| json!("en-US"))
            .with_error("lang should be set to a valid language code")
            .with_display("Specifies a language")
            .with_info("The lang member is a string that represents the default language of your PWA.")
            .with_docs("https://developer.mozilla.org/en-US/docs/Web/Manifest/lang"),
        Rule::member("dir", Optional, Presence)
            .with_default(|| json!("ltr"))
            .with_error("dir should be set to the default text direction")
            .with_display("Specifies a text direction")
            .with_info("The dir member is a string that represents the default text direction of your PWA.")
            .with_docs("https://developer.mozilla.org/en-US/docs/Web/Manifest/dir"),
        Rule::member("description", Optional, Member(predicates::is_non_empty_string))
            .with_default(|| json!(""))
            .with_error("description should be a string with a length > 0")
            .with_display("Contains a description")
            .with_info("The description member is a string that represents the description of your PWA.")
            .with_docs("https://developer.mozilla.org/en-US/docs/Web/Manifest/description"),
        Rule::member("description", Optional, Member(predicates::trimmed_fix))
            .with_test_name("whitespace")
            .with_error("description should not have any leading or trailing whitespace")
            .with_display("description has no leading or trailing whitespace"),
        Rule::member("protocol_handlers", Optional, Presence)
            .with_default(|| json!([]))
            .with_error("protocol_handlers should list the protocols this app can handle")
            .with_display("Registers protocol handlers")
            .with_info("The protocol_handlers member specifies an array of objects that are protocols which this web app can register and handle.")
            .with_docs("https://developer.mozilla.org/en-US/docs/Web/Manifest/protocol_handlers"),
        Rule::member("display_override", Optional, Presence)
            .with_default(|| json!([]))
            .with_error("display_override should list the preferred display modes in order")
            .with_display("Specifies display_override")
            .with_info("The display_override member is an array of display modes that are considered in order; the first supported display mode is applied.")
            .with_docs("https://developer.mozilla.org/en-US/docs/Web/Manifest/display_override"),
        Rule::member("icons", Recommended, Member(predicates::icons_declare_type))
            .with_test_name("type")
            .with_error("every icon should specify its type")
            .with_display("Icons specify their type")
            .with_docs("https://developer.mozilla.org/en-US/docs/Web/Manifest/icons"),
        Rule::member("icons", Recommended, Member(predicates::icons_declare_sizes))
            .with_test_name("sizes")
            .with_error("every icon should specify its sizes")
            .with_display("Icons specify their size")
            .with_docs("https://developer.mozilla.org/en-US/docs/Web/Manifest/icons"),
    ]
}

fn default_icons() -> Value {
    json!([
        {
            "src": "https://www.pwabuilder.com/assets/icons/icon_192.png",
            "sizes": "192x192",
            "type": "image/png",
            "purpose": "any"
        },
        {
            "src": "https://www.pwabuilder.com/assets/icons/icon_512.png",
            "sizes": "512x512",
            "type": "image/png",
            "purpose": "maskable"
        }
    ])
}

fn default_screenshots() -> Value {
    json!([
        {
            "src": "https://www.pwabuilder.com/assets/screenshots/screen1.png",
            "sizes": "2880x1800",
            "type": "image/png",
            "description": "PWABuilder Home Screen"
        },
        {
            "src": "https://www.pwabuilder.com/assets/screenshots/screen2.png",
            "sizes": "2880x1800",
            "type": "image/png",
            "description": "PWABuilder Report Card"
        },
        {
            "src": "https://www.pwabuilder.com/assets/screenshots/screen3.png",
            "sizes": "2880x1800",
            "type": "image/png",
            "description": "Manifest information on the Report Card"
        }
    ])
}
