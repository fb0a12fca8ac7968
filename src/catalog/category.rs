//! Display categories for the task picker.

/// Audience grouping shown in the task picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Category {
    /// Tasks useful to everyone.
    #[default]
    Common,
    /// Marketing.
    Marketing,
    /// Sales.
    Sales,
    /// Operations.
    Operations,
    /// Customer support.
    CustomerSupport,
    /// Engineering.
    Engineering,
    /// Internal IT.
    InformationSystems,
    /// Accounting.
    Accounting,
}

impl Category {
    /// Returns every category in display order.
    #[must_use]
    pub const fn all() -> &'static [Category] {
        &[
            Category::Common,
            Category::Marketing,
            Category::Sales,
            Category::Operations,
            Category::CustomerSupport,
            Category::Engineering,
            Category::InformationSystems,
            Category::Accounting,
        ]
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Common => "全社共通",
            Self::Marketing => "マーケティング向け",
            Self::Sales => "セールス向け",
            Self::Operations => "オペレーション向け",
            Self::CustomerSupport => "カスタマーサポート向け",
            Self::Engineering => "エンジニア向け",
            Self::InformationSystems => "情報システム向け",
            Self::Accounting => "経理向け",
        }
    }

    /// Classifies a task key. Unknown keys fall into [`Category::Common`].
    #[must_use]
    pub fn for_task(key: &str) -> Self {
        CATEGORY_TABLE
            .iter()
            .find(|(task, _)| *task == key)
            .map_or(Self::Common, |(_, category)| *category)
    }
}

const CATEGORY_TABLE: &[(&str, Category)] = &[
    ("proofread", Category::Common),
    ("email", Category::Common),
    ("summarize", Category::Common),
    ("brainstorm", Category::Common),
    ("translate", Category::Common),
    ("escalation_summary", Category::Common),
    ("persona_creation", Category::Marketing),
    ("ad_copy", Category::Marketing),
    ("competitor_analysis", Category::Marketing),
    ("ga_summary", Category::Marketing),
    ("meta_description", Category::Marketing),
    ("sitemap_robotstxt", Category::Marketing),
    ("presentation", Category::Sales),
    ("meeting_summary", Category::Sales),
    ("approach_email", Category::Sales),
    ("faq_generation", Category::Sales),
    ("product_description", Category::Operations),
    ("newsletter", Category::Operations),
    ("sns_post", Category::Operations),
    ("formula_gen", Category::Operations),
    ("cs_reply", Category::CustomerSupport),
    ("claim_email", Category::CustomerSupport),
    ("client_slide_gen", Category::Engineering),
    ("effort_estimation", Category::Engineering),
    ("code_gen", Category::Engineering),
    ("code_review", Category::Engineering),
    ("test_case", Category::Engineering),
    ("log_analysis", Category::Engineering),
    ("sql_gen", Category::Engineering),
    ("it_troubleshoot", Category::InformationSystems),
    ("script_gen", Category::InformationSystems),
    ("it_vendor_comparison", Category::InformationSystems),
    ("it_setup_manual", Category::InformationSystems),
    ("journal_entry", Category::Accounting),
    ("accounting_report_summary", Category::Accounting),
    ("accounting_closing_checklist", Category::Accounting),
];
