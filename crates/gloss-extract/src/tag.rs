//! Coarse semantic tagging of terms.
//!
//! Both classifiers are ordered rule tables evaluated first-match-wins. A rule matches
//! when any of its markers matches the term.

use serde::{Deserialize, Serialize};
use Marker::{Contains, EndsWith};

use crate::record::RecordMetadata;

/// How a marker matches a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// The term contains the string.
    Contains(&'static str),
    /// The term ends with the string.
    EndsWith(&'static str),
}

impl Marker {
    /// Tests the marker against a term.
    pub fn matches(self, term: &str) -> bool {
        match self {
            Self::Contains(s) => term.contains(s),
            Self::EndsWith(s) => term.ends_with(s),
        }
    }
}

/// One row of a classifier table.
#[derive(Debug, Clone, Copy)]
pub struct Rule<L: 'static> {
    /// Label assigned on match.
    pub label: L,
    /// Markers, any of which selects this rule.
    pub markers: &'static [Marker],
}

/// Returns the label of the first rule with a matching marker.
pub fn first_match<L: Copy>(rules: &[Rule<L>], term: &str) -> Option<L> {
    rules
        .iter()
        .find(|rule| rule.markers.iter().any(|m| m.matches(term)))
        .map(|rule| rule.label)
}

/// What kind of concept a term names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConceptType {
    /// An amount, ratio, or indicator.
    Metric,
    /// Something that happens or is booked.
    Event,
    /// A policy, plan, system, or organizational arrangement.
    Structure,
    /// An organizational unit.
    Entity,
    /// Anything else.
    Other,
}

/// Financial or business area a term belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Profit and loss statement.
    #[serde(rename = "PL")]
    ProfitAndLoss,
    /// Balance sheet.
    #[serde(rename = "BS")]
    BalanceSheet,
    /// Cash flow statement.
    #[serde(rename = "CF")]
    CashFlow,
    /// Risk disclosures.
    Risk,
    /// Governance and internal control.
    Governance,
    /// Business description and strategy.
    Business,
}

/// Concept type rules in precedence order.
pub const CONCEPT_RULES: &[Rule<ConceptType>] = &[
    Rule {
        label: ConceptType::Metric,
        markers: &[
            Contains("高"),
            Contains("額"),
            Contains("利益"),
            Contains("損失"),
            Contains("収益"),
            Contains("売上"),
            Contains("費"),
            Contains("コスト"),
            Contains("率"),
            Contains("比率"),
            Contains("件数"),
            Contains("人数"),
            Contains("数量"),
            Contains("単価"),
            Contains("KPI"),
            Contains("ROE"),
            Contains("ROA"),
            Contains("EBITDA"),
            Contains("EPS"),
            Contains("PER"),
            Contains("PBR"),
            Contains("CF"),
            Contains("FCF"),
        ],
    },
    Rule {
        label: ConceptType::Event,
        markers: &[
            Contains("減損"),
            Contains("買収"),
            Contains("合併"),
            Contains("取得"),
            Contains("売却"),
            Contains("訴訟"),
            Contains("計上"),
            Contains("発生"),
            Contains("適用"),
        ],
    },
    Rule {
        label: ConceptType::Structure,
        markers: &[
            Contains("セグメント"),
            Contains("方針"),
            Contains("戦略"),
            Contains("計画"),
            Contains("モデル"),
            Contains("システム"),
            Contains("プロセス"),
            Contains("体制"),
            Contains("ガバナンス"),
            Contains("内部統制"),
        ],
    },
    Rule {
        label: ConceptType::Entity,
        markers: &[
            Contains("委員会"),
            Contains("グループ"),
            Contains("子会社"),
            Contains("連結子会社"),
            Contains("部"),
            Contains("本部"),
            Contains("室"),
            Contains("会"),
        ],
    },
];

/// Category rules in precedence order.
pub const CATEGORY_RULES: &[Rule<Category>] = &[
    Rule {
        label: Category::ProfitAndLoss,
        markers: &[
            Contains("売上"),
            Contains("利益"),
            Contains("収益"),
            Contains("費用"),
            Contains("原価"),
            Contains("営業"),
            Contains("経常"),
        ],
    },
    Rule {
        label: Category::BalanceSheet,
        markers: &[
            Contains("資産"),
            Contains("負債"),
            Contains("純資産"),
            Contains("のれん"),
            Contains("株主資本"),
        ],
    },
    Rule {
        label: Category::CashFlow,
        markers: &[Contains("キャッシュ"), EndsWith("CF")],
    },
    Rule {
        label: Category::Risk,
        markers: &[Contains("リスク")],
    },
    Rule {
        label: Category::Governance,
        markers: &[
            Contains("ガバナンス"),
            Contains("内部統制"),
            Contains("コンプライアンス"),
        ],
    },
    Rule {
        label: Category::Business,
        markers: &[
            Contains("セグメント"),
            Contains("KPI"),
            Contains("事業"),
            Contains("顧客"),
            Contains("戦略"),
        ],
    },
];

/// Classifies the concept type of a term.
pub fn concept_type(term: &str) -> ConceptType {
    first_match(CONCEPT_RULES, term).unwrap_or(ConceptType::Other)
}

/// Classifies the category of a term, if any rule applies.
pub fn category(term: &str) -> Option<Category> {
    first_match(CATEGORY_RULES, term)
}

/// Builds record metadata for one entity's terms.
#[derive(Debug, Clone)]
pub struct TermTagger {
    /// Source label written into every record.
    source: String,
    /// Entity name written into every record.
    entity: String,
}

impl TermTagger {
    /// Creates a tagger for one entity.
    pub fn new(source: impl Into<String>, entity: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            entity: entity.into(),
        }
    }

    /// Tags a term.
    pub fn tag(&self, term: &str) -> RecordMetadata {
        RecordMetadata::noun(
            concept_type(term),
            category(term),
            &self.source,
            &self.entity,
        )
    }
}
