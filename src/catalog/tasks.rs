//! Built-in task definitions.
//!
//! Each task pairs an ordered field list with a prompt builder. Builders read
//! values by field id and never fail: optional fields fall back to an empty
//! string or the "指定なし" marker.

use super::TaskDefinition;
use super::fields::FieldDefinition;
use super::values::FieldValues;

pub(super) static BUILTIN_TASKS: &[TaskDefinition] = &[
    PROOFREAD,
    EMAIL,
    SUMMARIZE,
    BRAINSTORM,
    TRANSLATE,
    ESCALATION_SUMMARY,
    PERSONA_CREATION,
    AD_COPY,
    COMPETITOR_ANALYSIS,
    GA_SUMMARY,
    META_DESCRIPTION,
    SITEMAP_ROBOTSTXT,
    PRESENTATION,
    MEETING_SUMMARY,
    APPROACH_EMAIL,
    FAQ_GENERATION,
    PRODUCT_DESCRIPTION,
    NEWSLETTER,
    SNS_POST,
    CS_REPLY,
    CLAIM_EMAIL,
    FORMULA_GEN,
    CLIENT_SLIDE_GEN,
    EFFORT_ESTIMATION,
    CODE_GEN,
    CODE_REVIEW,
    TEST_CASE,
    LOG_ANALYSIS,
    SQL_GEN,
    IT_TROUBLESHOOT,
    SCRIPT_GEN,
    IT_VENDOR_COMPARISON,
    IT_SETUP_MANUAL,
    JOURNAL_ENTRY,
    ACCOUNTING_REPORT_SUMMARY,
    ACCOUNTING_CLOSING_CHECKLIST,
];

// =============================================================================
// Shared fields
// =============================================================================

const RECIPIENT_SELECT: FieldDefinition =
    FieldDefinition::choice("recipient_type_select", "送信先", &["取引先", "顧客", "社内", "その他"])
        .required();

const RECIPIENT_CUSTOM: FieldDefinition =
    FieldDefinition::text("recipient_type_custom", "送信先（自由入力）")
        .placeholder("例：株主、提携企業")
        .when_other("recipient_type_select");

const TONE: FieldDefinition =
    FieldDefinition::choice("tone", "トーン", &["丁寧", "普通", "カジュアル"]);

const PRODUCT_SERVICE_SELECT: FieldDefinition = FieldDefinition::choice(
    "product_service_select",
    "商品・サービスカテゴリ",
    &["BtoC商材", "BtoB商材", "その他（自由入力）"],
)
.required();

// =============================================================================
// 全社共通
// =============================================================================

const PROOFREAD: TaskDefinition = TaskDefinition {
    key: "proofread",
    display_name: "文章の校正",
    fields: &[
        FieldDefinition::multiline("original_text", "校正したい文章")
            .placeholder("ここに文章を入力してください。")
            .required(),
        RECIPIENT_SELECT,
        RECIPIENT_CUSTOM,
        TONE,
    ],
    prompt: proofread_prompt,
};

fn proofread_prompt(v: &FieldValues) -> String {
    let recipient = v.choice_or_custom("recipient_type_select", "recipient_type_custom");
    let tone_instruction = if v.has_value("tone") {
        format!(
            "特に、文章全体のトーンが「{}」になるように調整してください。",
            v.text("tone")
        )
    } else {
        String::new()
    };
    let original = v.text("original_text");
    format!(
        "あなたはプロの編集者です。以下の文章を、送信先が「{recipient}」であることを考慮して校正してください。\n\
         誤字脱字の修正と、不自然な日本語の改善を重点的にお願いします。\n\
         {tone_instruction}\n\n\
         # 元の文章\n\
         {original}\n\n\
         # 出力形式\n\
         修正後の文章のみを提示してください。解説は不要です。"
    )
}

const EMAIL: TaskDefinition = TaskDefinition {
    key: "email",
    display_name: "ビジネスメール作成（文章作成）",
    fields: &[
        FieldDefinition::text("subject", "件名（空欄の場合、自動で提案）")
            .placeholder("例：来週の会議の日程調整について"),
        RECIPIENT_SELECT,
        RECIPIENT_CUSTOM,
        TONE,
        FieldDefinition::multiline("points", "含めるべき要点（箇条書きで入力）")
            .placeholder("・A案件の進捗報告\n・B案件に関する相談\n・添付資料の確認依頼")
            .required(),
    ],
    prompt: email_prompt,
};

fn email_prompt(v: &FieldValues) -> String {
    let subject_instruction = if v.has_value("subject") {
        format!("件名は「{}」としてください。", v.text("subject"))
    } else {
        "内容に最も適した件名を生成してください。".to_string()
    };
    let recipient = v.choice_or_custom("recipient_type_select", "recipient_type_custom");
    let tone = v.text_or("tone", "丁寧");
    let points = v.text("points");
    format!(
        "以下の条件で、日本のビジネス文化に適した丁寧なビジネスメールを作成してください。\n\n\
         # 条件\n\
         - 送信先: {recipient}\n\
         - {subject_instruction}\n\
         - トーン: {tone}\n\
         - 含めるべき要点: \n\
         {points}\n\n\
         # 出力形式\n\
         件名と本文を明確に分けてください。時候の挨拶や結びの言葉も適切に含めてください。ただし、「拝啓」「敬具」は使用しないでください。宛名は含めず、「〇〇様」のような書き出しも不要です。本文から書き始めてください。"
    )
}

const SUMMARIZE: TaskDefinition = TaskDefinition {
    key: "summarize",
    display_name: "文章の要約",
    fields: &[
        FieldDefinition::multiline("text", "要約したい文章")
            .placeholder("ここに文章を貼り付けてください")
            .one_of("summary_source"),
        FieldDefinition::file("file_upload", "または、ファイルをアップロード").one_of("summary_source"),
        FieldDefinition::choice(
            "format_select",
            "要約の形式",
            &["箇条書きで", "段落で要約", "重要な点を1文で", "その他（自由入力）"],
        )
        .required(),
        FieldDefinition::text("format_custom", "補足：要約の形式を自由入力")
            .placeholder("例：5W1Hを明確にして")
            .when_other("format_select"),
    ],
    prompt: summarize_prompt,
};

fn summarize_prompt(v: &FieldValues) -> String {
    let format = v.choice_or_custom("format_select", "format_custom");
    let source = v.first_of(&["file_upload", "text"]);
    format!(
        "以下の文章を「{format}」で要約してください。要点は明確に、元の文章の意図を正確に捉えてください。\n\n\
         # 元の文章\n{source}"
    )
}

const BRAINSTORM: TaskDefinition = TaskDefinition {
    key: "brainstorm",
    display_name: "アイデア出し",
    fields: &[
        FieldDefinition::text("theme", "テーマ")
            .placeholder("例：社内コミュニケーションを活性化させる方法")
            .required(),
        FieldDefinition::number("count", "アイデアの数")
            .placeholder("例：10")
            .required(),
        FieldDefinition::text("perspective", "重視する視点")
            .placeholder("例：斬新さ、低コストで実現可能か"),
    ],
    prompt: brainstorm_prompt,
};

fn brainstorm_prompt(v: &FieldValues) -> String {
    let count = v.text("count");
    let theme = v.text("theme");
    let perspective = v.or_unspecified("perspective");
    format!(
        "以下のテーマについて、アイデアを{count}個出してください。\n\n\
         # テーマ\n{theme}\n\n\
         # 重視する視点\n{perspective}\n\n\
         # 出力形式\n\
         - アイデアは箇条書きで記述してください。\n\
         - それぞれのアイデアに簡単な説明を加えてください。"
    )
}

const TRANSLATE: TaskDefinition = TaskDefinition {
    key: "translate",
    display_name: "翻訳",
    fields: &[
        FieldDefinition::choice("source_lang", "翻訳元の言語", &["日本語", "英語", "自動検出"]),
        FieldDefinition::choice("target_lang", "翻訳先の言語", &["英語", "日本語", "中国語"])
            .required(),
        FieldDefinition::multiline("text", "翻訳したい文章")
            .placeholder("ここに翻訳したい文章を入力してください")
            .required(),
    ],
    prompt: translate_prompt,
};

fn translate_prompt(v: &FieldValues) -> String {
    let source = v.text("source_lang");
    let from = if source.is_empty() || source == "自動検出" {
        String::new()
    } else {
        format!("「{source}」から")
    };
    let target = v.text("target_lang");
    let text = v.text("text");
    format!(
        "以下の文章を{from}「{target}」に自然な表現で翻訳してください。\n\n\
         # 翻訳対象の文章\n{text}"
    )
}

const ESCALATION_SUMMARY: TaskDefinition = TaskDefinition {
    key: "escalation_summary",
    display_name: "エスカレーション用サマリー作成",
    fields: &[
        FieldDefinition::choice(
            "report_type",
            "報告種別",
            &["システム不具合", "運用不備", "クライアント報告"],
        )
        .required(),
        FieldDefinition::multiline("communication_history", "これまでの経緯や事象の詳細")
            .placeholder("顧客とのメール、チャット履歴、発生した事象の詳細などを貼り付けてください。")
            .required(),
    ],
    prompt: escalation_summary_prompt,
};

fn escalation_summary_prompt(v: &FieldValues) -> String {
    let history = v.text("communication_history");
    match v.text("report_type") {
        "システム不具合" => format!(
            "あなたは優秀なインシデントマネージャーです。以下の情報から、システム不具合の報告書を作成してください。各項目について、情報がない場合は「不明」または「確認中」と記述してください。\n\n\
             # 入力情報\n{history}\n\n\
             # 出力フォーマット\n\
             ブランド起因ではありますが、顧客影響のある事象が発生しているようです。\n\
             すでにどなたかキャッチし、明日のご対応準備をいただいておりますでしょうか。\n\n\
             ▼ブランド\n[入力情報からブランド名やサイト名を抽出]\n\n\
             ▼セキュリティインシデント\n該当しない\n\n\
             ▼発生事象および影響範囲、影響内容\n[入力情報から、何が起きていて、どのような影響が出ているかを具体的に記述]\n\n\
             ▼検知日時\n[入力情報から日時を抽出。例：YYYY/MM/DD HH:MM]\n\n\
             ▼検知者\n[入力情報から誰が検知したかを抽出。例：ブランド様からのご連絡]\n\n\
             ▼発生期間\n確認中\n\n\
             ▼原因\n調査中\n\n\
             ▼対応状況\n調査中\n\n\
             ▼お客様側の対応\n[入力情報から、顧客にどのような対応が必要か、またはブランドから指示があったかを記述]"
        ),
        "運用不備" => format!(
            "あなたはチームリーダーです。以下の情報から、運用不備の報告書を作成してください。各項目について、情報がない場合は「不明」または「確認中」と記述してください。\n\n\
             # 入力情報\n{history}\n\n\
             # 出力フォーマット\n\
             運用不備が発生いたしましたのでご報告いたします。\n\n\
             ■発生日\n[入力情報から発生日を抽出]\n\n\
             ■発覚日\n[入力情報から発覚日と発覚経緯を抽出]\n\n\
             ■発生事象\n[入力情報から、何が起きたのかを具体的に記述]\n\n\
             ■発生原因\n[入力情報から、なぜその事象が発生したのか原因を記述]\n\n\
             ■対策\n確認中\n\n\
             ■お客様対応\n[入力情報から、顧客に対してどのような対応を検討・実施しているかを記述]\n\n\
             ■クライアント報告\n[入力情報から、クライアントへの報告状況を記述]"
        ),
        "クライアント報告" => format!(
            "あなたは顧客対応の責任者です。以下の情報をもとに、クライアント向けの丁寧な不具合報告メールを作成してください。\n\n\
             # 入力情報\n{history}\n\n\
             # 出力フォーマット\n\
             お世話になっております。\n\
             [入力情報をもとに、いつ、何がリリースされ、どのような不具合が判明したのかを丁寧に記述]\n\n\
             ■現象\n[入力情報から、具体的な現象を箇条書きで記述]\n\n\
             ■発生原因\n[入力情報から、原因を具体的に記述]\n\n\
             ■影響\n[入力情報から、顧客や売上、データへの影響を箇条書きで記述]\n\n\
             ■対応\n[入力情報から、今後の修正や顧客対応の計画を箇条書きで記述]\n\n\
             この度はご迷惑をおかけし申し訳ございません。\n\
             ご不明点やご質問などございましたらお知らせいただけますと幸いです。\n\
             ご確認の程よろしくお願いいたします。"
        ),
        _ => format!(
            "以下の情報を整理し、エスカレーション用のサマリーを作成してください。\n\n\
             # 入力情報\n{history}"
        ),
    }
}

// =============================================================================
// マーケティング向け
// =============================================================================

const PERSONA_CREATION: TaskDefinition = TaskDefinition {
    key: "persona_creation",
    display_name: "ペルソナ（顧客像）作成",
    fields: &[
        PRODUCT_SERVICE_SELECT,
        FieldDefinition::text("product_service_custom", "商品・サービス名（自由入力）")
            .placeholder("例：ECサイト向け高機能CRMツール")
            .when_other("product_service_select"),
        FieldDefinition::multiline("target_info", "ターゲット層の情報（箇条書き）")
            .placeholder("・中小企業のECサイト運営者\n・顧客との関係構築に課題を感じている\n・データ分析は苦手")
            .required(),
    ],
    prompt: persona_creation_prompt,
};

fn persona_creation_prompt(v: &FieldValues) -> String {
    let product = v.choice_or_custom("product_service_select", "product_service_custom");
    let target = v.text("target_info");
    format!(
        "あなたは経験豊富なマーケターです。以下の情報に基づいて、商品・サービスのターゲットとなる具体的なペルソナを作成してください。\n\n\
         # 商品・サービス\n{product}\n\n\
         # ターゲット層の情報\n{target}\n\n\
         # 出力形式\n\
         以下の項目を具体的に埋めて、一人の人物像が浮かび上がるようなペルソナを作成してください。\n\
         - **名前:**\n- **年齢:**\n- **性別:**\n- **職業・役職:**\n- **ライフスタイル:**\n\
         - **価値観・性格:**\n- **抱えている課題・悩み:**\n- **情報収集の方法:**\n\
         - **商品・サービスに期待すること:**"
    )
}

const AD_COPY: TaskDefinition = TaskDefinition {
    key: "ad_copy",
    display_name: "広告コピー・キャッチフレーズ作成",
    fields: &[
        PRODUCT_SERVICE_SELECT,
        FieldDefinition::text("product_service_custom", "商品・サービス名（自由入力）")
            .placeholder("例：AI議事録自動作成ツール「Transcribe Pro」")
            .when_other("product_service_select"),
        FieldDefinition::text("target_audience", "ターゲット層")
            .placeholder("例：会議の多いビジネスパーソン")
            .required(),
        FieldDefinition::multiline("features", "商品・サービスの主な特徴（箇条書き）")
            .placeholder("・98%の高精度な文字起こし\n・話者分離機能\n・ワンクリックで要約を作成")
            .required(),
        FieldDefinition::text("appeal_point", "最も訴求したいポイント")
            .placeholder("例：議事録作成の時間が1/10になる")
            .required(),
    ],
    prompt: ad_copy_prompt,
};

fn ad_copy_prompt(v: &FieldValues) -> String {
    let product = v.choice_or_custom("product_service_select", "product_service_custom");
    let audience = v.text("target_audience");
    let features = v.text("features");
    let appeal = v.text("appeal_point");
    format!(
        "あなたはプロのコピーライターです。以下の情報に基づいて、読者の心に響く広告コピーとキャッチフレーズをそれぞれ5つずつ作成してください。\n\n\
         # 商品・サービス名\n{product}\n\n\
         # ターゲット層\n{audience}\n\n\
         # 主な特徴\n{features}\n\n\
         # 最も訴求したいポイント\n{appeal}\n\n\
         # 出力形式\n\
         - **キャッチフレーズ案 (5つ):** (短く、インパクトのあるフレーズ)\n\
         - **広告コピー案 (5つ):** (ターゲットの課題に共感し、解決策として商品を提示する短い文章)"
    )
}

const COMPETITOR_ANALYSIS: TaskDefinition = TaskDefinition {
    key: "competitor_analysis",
    display_name: "競合分析レポート",
    fields: &[
        FieldDefinition::text("product_service", "自社の商品・サービス")
            .placeholder("例：オーガニック野菜の宅配サービス")
            .required(),
        FieldDefinition::multiline("competitor_info", "競合の情報（URLや特徴など）")
            .placeholder("例：A社 (https://example.com) - 価格が安いが品揃えは少ない。\nB社 - 高級路線で品質が高い。")
            .required(),
    ],
    prompt: competitor_analysis_prompt,
};

fn competitor_analysis_prompt(v: &FieldValues) -> String {
    let product = v.text("product_service");
    let competitors = v.text("competitor_info");
    format!(
        "あなたはマーケティングアナリストです。以下の情報に基づいて、競合分析の簡易レポートを作成してください。\n\n\
         # 自社の商品・サービス\n{product}\n\n\
         # 競合の情報\n{competitors}\n\n\
         # 出力形式\n\
         以下の項目について、競合の強み・弱み、そして自社が取るべき戦略の方向性を分析し、箇条書きで分かりやすくまとめてください。\n\
         - **競合の強み (Strength):**\n\
         - **競合の弱み (Weakness):**\n\
         - **自社にとっての機会 (Opportunity):**\n\
         - **自社にとっての脅威 (Threat):**\n\
         - **考察・自社の取るべき戦略:**"
    )
}

const GA_SUMMARY: TaskDefinition = TaskDefinition {
    key: "ga_summary",
    display_name: "GA4/サーチコンソールデータ要約",
    fields: &[
        FieldDefinition::file(
            "file_upload",
            "GA4/サーチコンソールからエクスポートしたCSVファイル",
        )
        .required(),
        FieldDefinition::text("analysis_goal", "特に分析したいこと")
            .placeholder("例：直帰率が高いページの原因と対策")
            .required(),
    ],
    prompt: ga_summary_prompt,
};

fn ga_summary_prompt(v: &FieldValues) -> String {
    let goal = v.text("analysis_goal");
    let csv = v.text("file_upload");
    format!(
        "あなたはプロのWebアナリストです。以下のCSVデータ（Googleアナリティクス4またはGoogleサーチコンソールからエクスポートされたもの）を分析し、レポートを作成してください。\n\n\
         # 特に分析したいこと\n{goal}\n\n\
         # CSVデータ\n```csv\n{csv}\n```\n\n\
         # 出力形式\n\
         以下の構成で、具体的な改善アクションに繋がるレポートを作成してください。\n\
         1.  **データの概要:** (データ全体の主要な傾向を要約)\n\
         2.  **問題点の指摘:** (データから読み取れる具体的な問題点を3つ指摘)\n\
         3.  **改善提案:** (指摘した問題点それぞれに対する、具体的な改善アクションを提案)"
    )
}

const META_DESCRIPTION: TaskDefinition = TaskDefinition {
    key: "meta_description",
    display_name: "メタディスクリプション生成・リライト提案",
    fields: &[
        FieldDefinition::multiline("page_topic", "ページのメイントピックやキーワード")
            .placeholder("例：AIを活用したECサイト向けCRMツールの特徴と導入事例")
            .required(),
        FieldDefinition::text("page_url", "対象ページのURL（任意）")
            .placeholder("https://example.com/service/new-product"),
    ],
    prompt: meta_description_prompt,
};

fn meta_description_prompt(v: &FieldValues) -> String {
    let url = v.or_unspecified("page_url");
    let topic = v.text("page_topic");
    format!(
        "あなたはプロのSEOライターです。以下の情報に基づいて、Googleの検索結果でクリック率が高まるような、SEOに最適なタイトルとメタディスクリプションを3案ずつ作成してください。\n\n\
         # 対象URL\n{url}\n\n\
         # ページのメイントピック・キーワード\n{topic}\n\n\
         # 作成のポイント\n\
         - キーワードを自然に含める\n\
         - ユーザーの興味を引く具体的なメリットを提示する\n\
         - クリックを促す行動喚起（CTA）を含める\n\
         - 重複表現を避ける\n\n\
         # 出力形式\n\
         **【提案1】**\n- **タイトル:** (タイトル案1)\n- **メタディスクリプション:** (メタディスクリプション案1)\n\n\
         **【提案2】**\n- **タイトル:** (タイトル案2)\n- **メタディスクリプション:** (メタディスクリプション案2)\n\n\
         **【提案3】**\n- **タイトル:** (タイトル案3)\n- **メタディスクリプション:** (メタディスクリプション案3)"
    )
}

const SITEMAP_ROBOTSTXT: TaskDefinition = TaskDefinition {
    key: "sitemap_robotstxt",
    display_name: "自動サイトマップ・robots.txt生成",
    fields: &[FieldDefinition::file("file_upload", "サイトのURL一覧ファイル (TXT, CSV)").required()],
    prompt: sitemap_robotstxt_prompt,
};

fn sitemap_robotstxt_prompt(v: &FieldValues) -> String {
    let urls = v.text("file_upload");
    format!(
        "あなたはウェブサイトの専門家です。以下のURLリストに基づいて、最適なsitemap.xmlとrobots.txtを生成してください。リスト内に# DisallowとコメントがあるURLはrobots.txtでクロールを拒否してください。\n\n\
         # URLリスト\n{urls}\n\n\
         # 出力形式\n\
         ## sitemap.xml\n(ここにsitemap.xmlのコードを生成)\n\n\
         ## robots.txt\n(ここにrobots.txtのコードを生成)\n\n\
         それぞれ、そのままコピーして使えるようにコードブロックで囲んでください。"
    )
}

// =============================================================================
// セールス向け
// =============================================================================

const PRESENTATION: TaskDefinition = TaskDefinition {
    key: "presentation",
    display_name: "プレゼン構成案",
    fields: &[
        FieldDefinition::text("theme", "プレゼンのテーマ")
            .placeholder("例：新製品〇〇のマーケティング戦略")
            .required(),
        FieldDefinition::multiline("background", "プレゼンの背景・経緯").placeholder(
            "例：若年層の売上低下という課題があり、新たな顧客層獲得のために新製品を開発した。",
        ),
        FieldDefinition::text("audience", "対象者（聴衆）")
            .placeholder("例：営業部門のマネージャー")
            .required(),
        FieldDefinition::number("time", "発表時間（分）")
            .placeholder("例：15")
            .required(),
        FieldDefinition::text("goal", "プレゼンのゴール")
            .placeholder("例：提案する戦略の承認を得て、実行予算を獲得する。")
            .required(),
        FieldDefinition::text("key_message", "最も伝えたい核心的なメッセージ")
            .placeholder("例：この新製品は、新たな市場を切り開く鍵となる。")
            .required(),
        FieldDefinition::text("desired_reaction", "聴衆に期待する反応・行動")
            .placeholder("例：戦略の有効性を理解し、実行に協力的になってもらう。"),
        FieldDefinition::multiline("include_elements", "含めたい要素（箇条書き）").placeholder(
            "・市場調査のデータ\n・競合製品との比較\n・具体的なアクションプランとスケジュール",
        ),
    ],
    prompt: presentation_prompt,
};

fn presentation_prompt(v: &FieldValues) -> String {
    let theme = v.text("theme");
    let background = v.or_unspecified("background");
    let audience = v.text("audience");
    let time = v.text("time");
    let goal = v.text("goal");
    let key_message = v.text("key_message");
    let reaction = v.or_unspecified("desired_reaction");
    let elements = v.or_unspecified("include_elements");
    format!(
        "以下の条件で、説得力のあるプレゼンテーションの構成案を作成してください。\n\n\
         # プレゼンのテーマ\n{theme}\n\n\
         # 背景・経緯\n{background}\n\n\
         # 対象者（聴衆）\n{audience}\n\n\
         # 発表時間\n{time}分\n\n\
         # プレゼンのゴール\n{goal}\n\n\
         # 最も伝えたい核心的なメッセージ\n{key_message}\n\n\
         # 聴衆に期待する反応・行動\n{reaction}\n\n\
         # 含めたい要素\n{elements}\n\n\
         # 出力形式\n\
         - 全体のストーリーが論理的に流れるように構成してください。\n\
         - 各スライドのタイトル、話す内容の要点、そして想定される時間配分を具体的に示してください。"
    )
}

const MEETING_SUMMARY: TaskDefinition = TaskDefinition {
    key: "meeting_summary",
    display_name: "商談の要点まとめ・ネクストアクション提案",
    fields: &[
        FieldDefinition::multiline("meeting_notes", "商談の議事録やメモ")
            .placeholder("ここに議事録やメモのテキストを貼り付けてください。")
            .one_of("meeting_source"),
        FieldDefinition::file("file_upload", "または、議事録ファイルをアップロード")
            .one_of("meeting_source"),
    ],
    prompt: meeting_summary_prompt,
};

fn meeting_summary_prompt(v: &FieldValues) -> String {
    let notes = v.first_of(&["file_upload", "meeting_notes"]);
    format!(
        "あなたは優秀な営業アシスタントです。以下の商談議事録を分析し、要点と次のアクションをまとめてください。\n\n\
         # 商談議事録\n{notes}\n\n\
         # 出力形式\n\
         以下の構成で、簡潔に分かりやすくまとめてください。\n\
         - **商談のサマリー:** (誰が、何について話し、どうなったか)\n\
         - **決定事項:** (合意したこと、決まったこと)\n\
         - **顧客の主な課題・ニーズ:** (顧客が何に困っているか)\n\
         - **提案すべきネクストアクション:** (次に取るべき具体的な行動)"
    )
}

const APPROACH_EMAIL: TaskDefinition = TaskDefinition {
    key: "approach_email",
    display_name: "顧客へのアプローチメール作成",
    fields: &[
        FieldDefinition::multiline("customer_persona", "顧客ペルソナ")
            .placeholder("例：株式会社〇〇、営業部長、田中様。先日の展示会で名刺交換。ECサイトの売上拡大に強い関心あり。")
            .required(),
        FieldDefinition::text("product_service", "提案したい商品・サービス")
            .placeholder("例：弊社の最新CRMツール「Sales Navigator」")
            .required(),
        FieldDefinition::text("goal", "このメールのゴール")
            .placeholder("例：15分程度のオンラインMTGのアポイント獲得")
            .required(),
    ],
    prompt: approach_email_prompt,
};

fn approach_email_prompt(v: &FieldValues) -> String {
    let persona = v.text("customer_persona");
    let product = v.text("product_service");
    let goal = v.text("goal");
    format!(
        "あなたはトップセールスです。以下の情報に基づいて、顧客の心に響くパーソナライズされたアプローチメールを3パターン作成してください。\n\n\
         # 顧客ペルソナ\n{persona}\n\n\
         # 提案したい商品・サービス\n{product}\n\n\
         # メールを送る目的（ゴール）\n{goal}\n\n\
         # 出力形式\n\
         件名と本文を含んだ、すぐに使えるメール形式で3パターン提案してください。各パターンの切り口（例：課題解決を訴求、導入事例を提示など）も簡単に説明してください。"
    )
}

const FAQ_GENERATION: TaskDefinition = TaskDefinition {
    key: "faq_generation",
    display_name: "想定問答集の作成",
    fields: &[
        FieldDefinition::multiline("product_service", "商品・サービス概要")
            .placeholder("ここに商品やサービスの特徴、価格などの情報を入力してください。")
            .required(),
        FieldDefinition::multiline("customer_persona", "主な顧客ペルソナ（任意）")
            .placeholder("例：ITリテラシーがあまり高くない中小企業の経営者"),
    ],
    prompt: faq_generation_prompt,
};

fn faq_generation_prompt(v: &FieldValues) -> String {
    let product = v.text("product_service");
    let persona = v.or_unspecified("customer_persona");
    format!(
        "あなたは製品知識が豊富なカスタマーサポートのリーダーです。以下の情報に基づいて、顧客からよく寄せられる質問とそれに対する模範解答をまとめた「想定問答集」を作成してください。\n\n\
         # 商品・サービス情報\n{product}\n\n\
         # 主な顧客ペルソナ\n{persona}\n\n\
         # 出力形式\n\
         「Q. (想定される質問)」と「A. (分かりやすい回答)」の形式で、少なくとも10個の質問と回答のペアを作成してください。ペルソナが入力されている場合は、そのペルソナが抱きそうな質問を中心に構成してください。"
    )
}

// =============================================================================
// オペレーション向け
// =============================================================================

const PRODUCT_DESCRIPTION: TaskDefinition = TaskDefinition {
    key: "product_description",
    display_name: "ECサイトの商品紹介文作成",
    fields: &[
        FieldDefinition::text("product_name", "商品名")
            .placeholder("例：天然由来成分100% オーガニックシャンプー")
            .required(),
        FieldDefinition::multiline("features", "商品の特長・仕様（箇条書き）")
            .placeholder("・シリコン、パラベン不使用\n・保湿成分としてアルガンオイル配合\n・リラックスできるシトラスの香り")
            .required(),
        FieldDefinition::text("target_audience", "ターゲット顧客")
            .placeholder("例：髪のダメージや頭皮の乾燥に悩む30代女性")
            .required(),
        FieldDefinition::text("keywords", "含めたいキーワード（SEO対策）")
            .placeholder("例：ノンシリコン, ボタニカル, 美髪"),
    ],
    prompt: product_description_prompt,
};

fn product_description_prompt(v: &FieldValues) -> String {
    let name = v.text("product_name");
    let features = v.text("features");
    let audience = v.text("target_audience");
    let keywords = v.or_unspecified("keywords");
    format!(
        "あなたはプロのコピーライターです。ECサイトに掲載するため、以下の商品の紹介文を作成してください。\n\n\
         # 商品名\n{name}\n\n\
         # 商品の特長・仕様\n{features}\n\n\
         # ターゲット顧客\n{audience}\n\n\
         # 含めたいキーワード\n{keywords}\n\n\
         # 出力形式\n\
         - 顧客の心を掴むキャッチコピー\n\
         - 商品の魅力を伝える詳細な説明文（共感を呼ぶストーリーを交えて）\n\
         - 特長をまとめた箇条書き\n\
         上記の3つの要素を含んだ、購買意欲をそそる文章を作成してください。"
    )
}

const NEWSLETTER: TaskDefinition = TaskDefinition {
    key: "newsletter",
    display_name: "メルマガ・LINE配信用文章作成",
    fields: &[
        FieldDefinition::text("campaign_theme", "キャンペーンのテーマ・件名")
            .placeholder("例：【週末限定】全品20%OFFクーポンプレゼント！")
            .required(),
        FieldDefinition::text("target_audience", "配信対象")
            .placeholder("例：過去半年以内に購入したリピーターのお客様"),
        FieldDefinition::multiline("key_points", "伝えたい要点（箇条書き）")
            .placeholder("・セール期間\n・クーポンの利用方法\n・おすすめ商品3選")
            .required(),
        FieldDefinition::choice("tone", "トーン", &["丁寧", "親しみやすく", "プロフェッショナル"]),
    ],
    prompt: newsletter_prompt,
};

fn newsletter_prompt(v: &FieldValues) -> String {
    let theme = v.text("campaign_theme");
    let audience = v.or_unspecified("target_audience");
    let points = v.text("key_points");
    let tone = v.or_unspecified("tone");
    format!(
        "以下の条件で、メールマガジンまたはLINEで配信する文章を作成してください。\n\n\
         # キャンペーンのテーマ・件名\n{theme}\n\n\
         # 配信対象\n{audience}\n\n\
         # 伝えたい要点\n{points}\n\n\
         # トーン\n{tone}\n\n\
         # 出力形式\n\
         読者の開封率やクリック率が高まるような、魅力的で分かりやすい文章を作成してください。件名（タイトル）と本文を明確に分けてください。"
    )
}

const SNS_POST: TaskDefinition = TaskDefinition {
    key: "sns_post",
    display_name: "SNS投稿文作成",
    fields: &[
        FieldDefinition::choice(
            "platform",
            "SNSプラットフォーム",
            &["Instagram", "X (旧Twitter)", "Facebook"],
        )
        .required(),
        FieldDefinition::text("topic", "投稿のトピック")
            .placeholder("例：新商品「うるおいフェイスマスク」の発売開始")
            .required(),
        FieldDefinition::multiline("details", "投稿に含める詳細情報")
            .placeholder("・商品の特徴\n・発売記念キャンペーンの内容\n・商品ページへのリンク"),
        FieldDefinition::number("hashtags_count", "ハッシュタグの希望個数").placeholder("例：5"),
    ],
    prompt: sns_post_prompt,
};

fn sns_post_prompt(v: &FieldValues) -> String {
    let platform = v.text("platform");
    let topic = v.text("topic");
    let details = v.or_unspecified("details");
    let hashtags = v.text_or("hashtags_count", "5");
    format!(
        "以下の情報に基づいて、{platform}用のSNS投稿を作成してください。\n\n\
         # 投稿トピック\n{topic}\n\n\
         # 詳細情報\n{details}\n\n\
         # 出力形式\n\
         - ユーザーの興味を引き、エンゲージメント（いいね、コメント、シェア）を高めるような投稿文を作成してください。\n\
         - {platform}の特性に合わせて、文章の長さや表現を調整してください。\n\
         - 関連性が高く、効果的なハッシュタグを{hashtags}個提案してください。"
    )
}

const FORMULA_GEN: TaskDefinition = TaskDefinition {
    key: "formula_gen",
    display_name: "Excel/スプレッドシート数式作成",
    fields: &[
        FieldDefinition::choice("target_app", "使用するアプリ", &["Excel", "Googleスプレッドシート"])
            .required(),
        FieldDefinition::choice(
            "use_case",
            "やりたいことのカテゴリ",
            &[
                "データの集計（合計、平均、件数など）",
                "特定のデータを探す・取り出す（VLOOKUPなど）",
                "条件によって表示を変える（IFなど）",
                "文字を整える・つなげる",
                "日付を計算する",
                "その他（自由入力）",
            ],
        )
        .required(),
        FieldDefinition::multiline("data_example", "データのサンプルを貼り付け")
            .placeholder("例:\n      A         B        C\n1   商品名     カテゴリ   売上\n2   りんご     果物       100\n3   みかん     果物       150\n4   キャベツ   野菜       200")
            .one_of("sample_data"),
        FieldDefinition::file("file_upload", "または、サンプルファイルをアップロード")
            .one_of("sample_data"),
        FieldDefinition::multiline("task_details", "具体的な指示")
            .placeholder("例：E1セルに、カテゴリが「果物」である商品の売上合計を計算したい。")
            .required(),
    ],
    prompt: formula_gen_prompt,
};

fn formula_gen_prompt(v: &FieldValues) -> String {
    let app = v.text("target_app");
    let use_case = v.text("use_case");
    let sample = v.first_of(&["file_upload", "data_example"]);
    let details = v.text("task_details");
    format!(
        "あなたは{app}の専門家です。以下の条件に基づいて、ユーザーの要求を満たす数式を作成してください。\n\n\
         # 使用するアプリケーション\n{app}\n\n\
         # やりたいことのカテゴリ\n{use_case}\n\n\
         # データのサンプル\n```\n{sample}\n```\n\n\
         # 具体的な指示\n{details}\n\n\
         # 出力形式\n\
         1. **提案する数式:**\n   (ここに数式を記述)\n\
         2. **数式の説明:**\n   (数式が何をしているのか、各部分が何を意味するのかを分かりやすく解説)\n\
         3. **使用上の注意:**\n   (数式を貼り付ける際の注意点や、応用方法などを記載)\n\n\
         数式はそのままコピーして使えるように、`=...` の形式で提示してください。"
    )
}

// =============================================================================
// カスタマーサポート向け
// =============================================================================

const CS_REPLY: TaskDefinition = TaskDefinition {
    key: "cs_reply",
    display_name: "カスタマーサポート返信案作成",
    fields: &[
        FieldDefinition::multiline("inquiry_summary", "お客様からの問い合わせ内容")
            .placeholder("例：「注文した商品がまだ届きません。配送状況を教えてください。注文番号: 12345」")
            .required(),
        FieldDefinition::choice("situation", "状況", &["感謝", "謝罪", "質問への回答", "案内"])
            .required(),
        FieldDefinition::text("resolution", "回答・解決策の要点")
            .placeholder("例：配送遅延のお詫び。現在の配送状況と、お届け予定日を伝える。")
            .required(),
    ],
    prompt: cs_reply_prompt,
};

fn cs_reply_prompt(v: &FieldValues) -> String {
    let inquiry = v.text("inquiry_summary");
    let situation = v.text("situation");
    let resolution = v.text("resolution");
    format!(
        "あなたはECサイトの優秀なカスタマーサポート担当者です。以下のお客様からの問い合わせに対して、返信メールの文案を作成してください。\n\n\
         # 問い合わせ内容\n{inquiry}\n\n\
         # 対応の方向性\n{situation}\n\n\
         # 回答の要点\n{resolution}\n\n\
         # 出力形式\n\
         お客様の不安や不満に寄り添い、丁寧かつ共感的な姿勢が伝わるような文章を作成してください。件名と本文を明確に分け、ビジネスメールとして適切な形式で記述してください。"
    )
}

const CLAIM_EMAIL: TaskDefinition = TaskDefinition {
    key: "claim_email",
    display_name: "クレーム対応メール作成",
    fields: &[
        FieldDefinition::multiline("claim_content", "顧客からのクレーム内容")
            .placeholder("ここに顧客からのクレーム内容を貼り付けてください。")
            .required(),
        FieldDefinition::choice(
            "response_policy",
            "対応方針",
            &[
                "共感と傾聴を優先し、鎮静化を図る",
                "具体的な解決策・代替案を提示する",
                "毅然とした態度で、できないことは断る",
            ],
        )
        .required(),
        FieldDefinition::multiline("customer_info", "顧客情報（任意）")
            .placeholder("例：リピート顧客、田中様"),
    ],
    prompt: claim_email_prompt,
};

fn claim_email_prompt(v: &FieldValues) -> String {
    let claim = v.text("claim_content");
    let policy = v.text("response_policy");
    let customer = v.or_unspecified("customer_info");
    format!(
        "あなたはベテランのカスタマーサポート責任者です。以下のクレームに対し、指定された方針に基づいて、丁寧かつ適切な返信メールを作成してください。\n\n\
         # クレーム内容\n{claim}\n\n\
         # 対応方針\n{policy}\n\n\
         # 顧客情報\n{customer}\n\n\
         # 出力形式\n\
         件名と本文を含むビジネスメールの形式で作成してください。まず顧客の感情に寄り添う言葉を入れ、冷静かつ誠実な対応を心がけてください。指定された方針に基づき、具体的なフレーズや説明例を盛り込んでください。"
    )
}

// =============================================================================
// エンジニア向け
// =============================================================================

const CLIENT_SLIDE_GEN: TaskDefinition = TaskDefinition {
    key: "client_slide_gen",
    display_name: "修正方針要件サマリー",
    fields: &[
        FieldDefinition::multiline("communication_history", "BacklogやSlackのやり取り")
            .placeholder("ここにBacklogの課題やSlackのスレッドを貼り付けてください。")
            .one_of("source_material"),
        FieldDefinition::file("file_upload", "または、エクスポートしたファイルをアップロード")
            .accept(".txt,.csv,.md")
            .one_of("source_material"),
    ],
    prompt: client_slide_gen_prompt,
};

fn client_slide_gen_prompt(v: &FieldValues) -> String {
    let source = v.first_of(&["file_upload", "communication_history"]);
    format!(
        "あなたは、技術的な議論を非エンジニアのクライアントにも分かりやすく説明できる、経験豊富なプロジェクトマネージャーです。\n\
         以下のBacklogやSlackでのやり取りを分析し、クライアントに提出するための報告スライドの原稿を作成してください。\n\n\
         # 元のやり取り\n```\n{source}\n```\n\n\
         # 出力形式\n\
         出力は、以下の構成で、専門用語を避け、平易な言葉で記述してください。各項目はマークダウンのヘッダー（##）を使ってください。\n\n\
         ## 1. ご報告の概要\n\
         この修正が「何のために行われるのか」を簡潔に説明してください。\n\n\
         ## 2. 修正の目的・背景\n\
         どのような課題や要望があり、それを解決するために今回の修正が必要になったのか、経緯を説明してください。\n\n\
         ## 3. 修正内容と対応方針\n\
         エンジニアが「具体的に何をするのか」を、比喩などを用いて非エンジニアにもイメージが湧くように説明してください。\n\n\
         ## 4. 影響範囲\n\
         この修正によって、ユーザーの操作や他の機能にどのような影響があるか、または影響がないことを明確に記述してください。特に影響がない場合は「今回の修正によるユーザー操作への直接的な影響はございません」と記載してください。\n\n\
         ## 5. リリース予定日\n\
         リリース予定日を記載してください。やり取りから判断できない場合は「未定（確定次第、改めてご報告します）」と記載してください。"
    )
}

const EFFORT_ESTIMATION: TaskDefinition = TaskDefinition {
    key: "effort_estimation",
    display_name: "概算工数見積もり",
    fields: &[
        FieldDefinition::choice(
            "platform_select",
            "対象プラットフォーム",
            &["EC-CUBE", "SFCC", "Shopify", "その他"],
        )
        .required(),
        FieldDefinition::text("platform_custom", "プラットフォーム名（自由入力）")
            .placeholder("例：Magento, WooCommerce")
            .when_other("platform_select"),
        FieldDefinition::multiline("requirements_text", "要件（箇条書きなどで入力）")
            .placeholder("・会員登録時に追加のアンケート項目を5つ表示する\n・マイページに購入履歴一覧を追加する\n・特定の送料無料商品と通常商品を同時に購入した場合、送料を無料にする")
            .one_of("requirements_source"),
        FieldDefinition::file("requirements_file", "または、要件定義書をアップロード")
            .accept(".txt,.csv,.md,.pdf,.doc,.docx")
            .one_of("requirements_source"),
    ],
    prompt: effort_estimation_prompt,
};

fn effort_estimation_prompt(v: &FieldValues) -> String {
    let platform = v.choice_or_custom("platform_select", "platform_custom");
    let requirements = v.first_of(&["requirements_file", "requirements_text"]);
    format!(
        "あなたは経験豊富なテックリードです。以下の要件とプラットフォーム情報に基づいて、開発の概算工数を見積もってください。\n\n\
         # 案件概要\n\
         - プラットフォーム: {platform}\n\
         - 要件:\n```\n{requirements}\n```\n\n\
         # 出力形式\n\
         以下の構成で、マークダウン形式で出力してください。\n\n\
         ## 1. WBS（作業分解構成図）と概算工数\n\
         要件を実現するために必要だと思われるタスクを細分化し、それぞれのタスクに対する現実的な工数（時間単位）を記載してください。\n\n\
         | 大項目 | 中項目（タスク） | 担当 | 想定工数（時間） | 備考 |\n\
         | :--- | :--- | :--- | :--- | :--- |\n\
         | 設計 | 画面設計 | FE | 8 | |\n\
         | | DB設計 | BE | 4 | |\n\
         | 実装 | フロントエンド | FE | 40 | |\n\
         | | バックエンド | BE | 60 | |\n\
         | テスト | 単体テスト | FE/BE | 20 | |\n\
         | | 結合テスト | QA | 16 | |\n\
         | その他 | 環境構築 | Infra | 8 | |\n\
         | | MTG/レビュー | ALL | 10 | |\n\
         | **合計** | | | **166** | |\n\n\
         ## 2. 見積もりの前提条件\n\
         - 今回の見積もりは、どのような条件下で算出されたものか、前提条件を箇条書きで記載してください。（例：デザイン作成の工数は含まない、など）\n\n\
         ## 3. 確認事項・不明点\n\
         - 要件の中で曖昧な点や、実装方針を決定するために追加で確認が必要な事項を箇条書きで記載してください。"
    )
}

const CODE_GEN: TaskDefinition = TaskDefinition {
    key: "code_gen",
    display_name: "コード生成",
    fields: &[
        FieldDefinition::choice(
            "language",
            "言語",
            &["複数言語（自動検出）", "JavaScript", "Python", "HTML/CSS", "SQL"],
        )
        .required(),
        FieldDefinition::multiline("request", "生成したいコードの内容")
            .placeholder("例：ECサイトの商品一覧を表示するReactコンポーネント。商品画像、商品名、価格、カート追加ボタンを含む。")
            .required(),
        FieldDefinition::file("file_upload", "サンプルファイル（任意）"),
    ],
    prompt: code_gen_prompt,
};

const AUTO_DETECT_LANGUAGE: &str = "複数言語（自動検出）";

fn code_gen_prompt(v: &FieldValues) -> String {
    let language = v.text_or("language", AUTO_DETECT_LANGUAGE);
    let auto = language == AUTO_DETECT_LANGUAGE;
    let language_instruction = if auto {
        "言語は指定された要件から自動で判断してください。".to_string()
    } else {
        format!("言語は{language}でお願いします。")
    };
    let sample_instruction = if v.has_value("file_upload") {
        format!(
            "\n\n# 参考にするサンプルコード\n```\n{}\n```",
            v.text("file_upload")
        )
    } else {
        String::new()
    };
    let fence_lang = if auto {
        String::new()
    } else {
        language
            .to_lowercase()
            .split('/')
            .next()
            .unwrap_or_default()
            .to_string()
    };
    let request = v.text("request");
    format!(
        "以下の要件を満たすコードを生成してください。{language_instruction}コードはすぐに利用できるよう、完成形で提供してください。{sample_instruction}\n\n\
         # 要件\n{request}\n\n\
         # 出力\n```{fence_lang}\n（ここにコードを記述）\n```"
    )
}

const CODE_REVIEW: TaskDefinition = TaskDefinition {
    key: "code_review",
    display_name: "コードレビュー支援",
    fields: &[
        FieldDefinition::file("file_upload", "レビューするコードファイル").required(),
        FieldDefinition::text("review_points", "特にレビューしてほしい点")
            .placeholder("例：パフォーマンス、セキュリティ、可読性")
            .required(),
    ],
    prompt: code_review_prompt,
};

fn code_review_prompt(v: &FieldValues) -> String {
    let points = v.text("review_points");
    let code = v.text("file_upload");
    format!(
        "あなたはシニアエンジニアとして、以下のソースコードをレビューしてください。\n\n\
         # 特にレビューしてほしい点\n{points}\n\n\
         # レビュー対象のコード\n```\n{code}\n```\n\n\
         # 出力形式\n\
         - **良い点 (Good Points):**\n\
         - **改善提案 (Suggestions for Improvement):** (具体的な修正コード例を添えてください)\n\
         - **潜在的なバグや懸念点 (Potential Bugs/Concerns):**\n\
         上記の項目で、箇条書きで分かりやすく指摘してください。"
    )
}

const TEST_CASE: TaskDefinition = TaskDefinition {
    key: "test_case",
    display_name: "テストケース作成",
    fields: &[
        FieldDefinition::multiline("feature_spec", "テスト対象の機能や仕様")
            .placeholder("例：ECサイトのログイン機能。メールアドレスとパスワードでログイン。3回失敗でアカウントロック。")
            .required(),
        FieldDefinition::choice(
            "test_type",
            "テストの種類",
            &["単体テスト", "結合テスト", "E2Eテストシナリオ"],
        )
        .required(),
    ],
    prompt: test_case_prompt,
};

fn test_case_prompt(v: &FieldValues) -> String {
    let test_type = v.text("test_type");
    let spec = v.text("feature_spec");
    format!(
        "以下の機能仕様に基づき、{test_type}のテストケースを作成してください。\n\n\
         # 機能仕様\n{spec}\n\n\
         # 出力形式\n\
         - テストID\n- テスト項目\n- 前提条件\n- 操作手順\n- 期待結果\n\
         の形式で、正常系・異常系を網羅したテストケースを表形式（マークダウン）で作成してください。"
    )
}

const LOG_ANALYSIS: TaskDefinition = TaskDefinition {
    key: "log_analysis",
    display_name: "ログ解析",
    fields: &[
        FieldDefinition::file("file_upload", "解析するログファイル (.log, .txt)").required(),
        FieldDefinition::text("analysis_request", "調査したいこと")
            .placeholder("例：発生しているエラーの種類と頻度を特定して。")
            .required(),
    ],
    prompt: log_analysis_prompt,
};

fn log_analysis_prompt(v: &FieldValues) -> String {
    let request = v.text("analysis_request");
    let log = v.text("file_upload");
    format!(
        "以下のログデータを解析し、リクエストに回答してください。\n\n\
         # 調査リクエスト\n{request}\n\n\
         # ログデータ\n```\n{log}\n```\n\n\
         # 出力\n\
         調査結果を要約し、関連するログの抜粋と共に報告してください。"
    )
}

const SQL_GEN: TaskDefinition = TaskDefinition {
    key: "sql_gen",
    display_name: "SQLクエリ生成",
    fields: &[
        FieldDefinition::multiline("db_schema", "データベーススキーマ（テーブル名、カラム名など）")
            .placeholder("例：users(id, name, email), orders(id, user_id, product_id, amount, created_at)")
            .required(),
        FieldDefinition::text("request", "取得したいデータの内容")
            .placeholder("例：過去1ヶ月で最も売れた商品トップ5")
            .required(),
    ],
    prompt: sql_gen_prompt,
};

fn sql_gen_prompt(v: &FieldValues) -> String {
    let schema = v.text("db_schema");
    let request = v.text("request");
    format!(
        "以下のデータベーススキーマと要件に基づいて、SQLクエリを生成してください。\n\n\
         # データベーススキーマ\n{schema}\n\n\
         # 要件\n{request}\n\n\
         # 出力\n\
         生成したSQLクエリと、そのクエリの簡単な説明を記述してください。"
    )
}

// =============================================================================
// 情報システム向け
// =============================================================================

const IT_TROUBLESHOOT: TaskDefinition = TaskDefinition {
    key: "it_troubleshoot",
    display_name: "ITトラブルシューティング",
    fields: &[FieldDefinition::multiline("problem", "発生している問題")
        .placeholder("例：会社のWi-Fiに接続できない。自分のPCだけ繋がらないようです。OSはWindows 11です。")
        .required()],
    prompt: it_troubleshoot_prompt,
};

fn it_troubleshoot_prompt(v: &FieldValues) -> String {
    let problem = v.text("problem");
    format!(
        "あなたは情報システム部の担当者です。以下の問い合わせについて、ユーザーが自身で試せるトラブルシューティングの手順を、初心者にも分かりやすく、ステップバイステップで回答してください。\n\n\
         # 問い合わせ内容\n{problem}\n\n\
         # 回答のポイント\n\
         - 最初に試すべき簡単な手順から案内する。\n\
         - 専門用語は避け、平易な言葉で説明する。\n\
         - それでも解決しない場合に、情シスに連絡する方法を記載する。"
    )
}

const SCRIPT_GEN: TaskDefinition = TaskDefinition {
    key: "script_gen",
    display_name: "シェル/PowerShellスクリプト生成",
    fields: &[
        FieldDefinition::choice(
            "os",
            "対象OS",
            &["Windows (PowerShell)", "Linux/macOS (Bash)"],
        )
        .required(),
        FieldDefinition::multiline("task", "自動化したいタスク")
            .placeholder("例：特定のフォルダ内にある、1ヶ月以上更新されていないlogファイルをすべて削除するスクリプト")
            .required(),
    ],
    prompt: script_gen_prompt,
};

fn script_gen_prompt(v: &FieldValues) -> String {
    let os = v.text("os");
    let task = v.text("task");
    format!(
        "以下のタスクを実行するための{os}スクリプトを生成してください。\n\n\
         # 自動化したいタスク\n{task}\n\n\
         # 出力形式\n\
         - スクリプトコード（コメント付き）\n\
         - スクリプトの簡単な説明\n\
         - 実行前の注意点\n\
         を記載してください。"
    )
}

const IT_VENDOR_COMPARISON: TaskDefinition = TaskDefinition {
    key: "it_vendor_comparison",
    display_name: "ITベンダー比較表作成",
    fields: &[
        FieldDefinition::multiline("vendor_a_info", "ベンダーAの情報（製品名、価格、特徴など）")
            .placeholder("製品名：〇〇チャット\n価格：1ユーザー800円/月\n特徴：UIが直感的、外部連携が豊富")
            .required(),
        FieldDefinition::multiline("vendor_b_info", "ベンダーBの情報")
            .placeholder("製品名：△△トーク\n価格：1ユーザー750円/月\n特徴：セキュリティが高い、ファイル管理機能が強力")
            .required(),
        FieldDefinition::text("comparison_points", "比較したい項目（カンマ区切り）")
            .placeholder("例：価格, 主な機能, セキュリティ, サポート体制")
            .required(),
    ],
    prompt: it_vendor_comparison_prompt,
};

fn it_vendor_comparison_prompt(v: &FieldValues) -> String {
    let vendor_a = v.text("vendor_a_info");
    let vendor_b = v.text("vendor_b_info");
    let points = v.text("comparison_points");
    format!(
        "あなたはITコンサルタントです。以下の2つの製品・サービスについて、公平な視点で比較検討表を作成してください。\n\n\
         # ベンダーAの情報\n{vendor_a}\n\n\
         # ベンダーBの情報\n{vendor_b}\n\n\
         # 比較項目\n{points}\n\n\
         # 出力形式\n\
         マークダウン形式の表（テーブル）で、各比較項目について分かりやすくまとめてください。最後に、どちらのベンダーがどのようなニーズに適しているか、簡単な総評も加えてください。"
    )
}

const IT_SETUP_MANUAL: TaskDefinition = TaskDefinition {
    key: "it_setup_manual",
    display_name: "新人用セットアップ手順書作成",
    fields: &[
        FieldDefinition::text("employee_name", "新入社員の氏名")
            .placeholder("例：鈴木 一郎")
            .required(),
        FieldDefinition::text("department", "配属部署")
            .placeholder("例：EC事業部")
            .required(),
        FieldDefinition::choice("pc_type", "PCの種類", &["Windows", "Mac"]).required(),
        FieldDefinition::multiline("required_tools", "使用する主要ツール（箇条書き）")
            .placeholder("・Google Workspace\n・Slack\n・Shopify管理画面")
            .required(),
    ],
    prompt: it_setup_manual_prompt,
};

fn it_setup_manual_prompt(v: &FieldValues) -> String {
    let name = v.text("employee_name");
    let department = v.text("department");
    let pc = v.text("pc_type");
    let tools = v.text("required_tools");
    format!(
        "以下の情報に基づき、新入社員向けのPCセットアップ手順書を作成してください。\n\n\
         # 対象者\n- 氏名: {name}\n- 配属部署: {department}\n\n\
         # セットアップ対象PC\n- OS: {pc}\n\n\
         # 導入必須ツール\n{tools}\n\n\
         # 出力形式\n\
         新入社員が一人でも作業を進められるように、以下の項目を含んだ丁寧で分かりやすい手順書を作成してください。\n\
         1. **はじめに**: (歓迎のメッセージと手順書の目的)\n\
         2. **PCの開封と初期設定**: (電源投入からOSの初期設定まで)\n\
         3. **ネットワーク接続**: (社内Wi-Fiへの接続方法)\n\
         4. **必須ツールのインストールとログイン**: (各ツールのセットアップ手順)\n\
         5. **困ったときの連絡先**: (情シス担当者の連絡先)"
    )
}

// =============================================================================
// 経理向け
// =============================================================================

const JOURNAL_ENTRY: TaskDefinition = TaskDefinition {
    key: "journal_entry",
    display_name: "仕訳サポート",
    fields: &[FieldDefinition::multiline("transaction", "取引の内容")
        .placeholder("例：7月1日に、取引先A社への売掛金10万円が普通預金口座に振り込まれた。")
        .required()],
    prompt: journal_entry_prompt,
};

fn journal_entry_prompt(v: &FieldValues) -> String {
    let transaction = v.text("transaction");
    format!(
        "あなたは経理の専門家です。以下の取引内容について、日本の会計基準に基づいた複式簿記の仕訳を提案してください。\n\n\
         # 取引内容\n{transaction}\n\n\
         # 出力形式\n\
         借方勘定科目、借方金額、貸方勘定科目、貸方金額、摘要を分かりやすく示してください。\n\
         例:\n(借方) 普通預金 100,000 / (貸方) 売掛金 100,000\n摘要: A社 売掛金入金"
    )
}

const ACCOUNTING_REPORT_SUMMARY: TaskDefinition = TaskDefinition {
    key: "accounting_report_summary",
    display_name: "財務レポート要約作成",
    fields: &[
        FieldDefinition::multiline("report_text", "要約したいレポートのテキスト")
            .placeholder("ここにP/LやB/Sなどのテキストを貼り付けてください。")
            .required(),
        FieldDefinition::text("target_audience", "報告対象者")
            .placeholder("例：経営会議の参加者、営業部門長")
            .required(),
        FieldDefinition::text("focus_points", "特に注目してほしい点")
            .placeholder("例：売上高の増減要因、販管費の状況"),
    ],
    prompt: accounting_report_summary_prompt,
};

fn accounting_report_summary_prompt(v: &FieldValues) -> String {
    let report = v.text("report_text");
    let audience = v.text("target_audience");
    let focus = v.or_unspecified("focus_points");
    format!(
        "あなたは優秀な経営アナリストです。以下の財務レポートを分析し、報告対象者向けに要約を作成してください。\n\n\
         # 元のレポート\n{report}\n\n\
         # 報告対象者\n{audience}\n\n\
         # 特に注目すべき点\n{focus}\n\n\
         # 出力形式\n\
         専門用語を避け、以下の構成で分かりやすいサマリーを作成してください。\n\
         1. **エグゼクティブサマリー**: (全体像を3行程度で)\n\
         2. **主要なポイント**: (注目すべき点を箇条書きで3～5点)\n\
         3. **今後の考察**: (データから読み取れる示唆や、次に確認すべき事項)"
    )
}

const ACCOUNTING_CLOSING_CHECKLIST: TaskDefinition = TaskDefinition {
    key: "accounting_closing_checklist",
    display_name: "月次決算チェックリスト作成",
    fields: &[
        FieldDefinition::text("closing_month", "対象月")
            .placeholder("例：2024年7月度")
            .required(),
        FieldDefinition::multiline("company_specifics", "会社特有のタスク（箇条書き）")
            .placeholder("・Shopify売上データとの突合\n・広告代理店からの請求書確認"),
    ],
    prompt: accounting_closing_checklist_prompt,
};

fn accounting_closing_checklist_prompt(v: &FieldValues) -> String {
    let month = v.text("closing_month");
    let specifics = v.or_unspecified("company_specifics");
    format!(
        "あなたは経験豊富な経理マネージャーです。以下の条件で、{month}の月次決算をスムーズに進めるためのチェックリストを作成してください。\n\n\
         # 会社特有のタスク\n{specifics}\n\n\
         # 出力形式\n\
         一般的な月次決算業務と会社特有のタスクを網羅し、時系列（例：第1週、第2週、月内最終日など）で整理されたチェックリストを作成してください。各項目には担当者が確認できるようチェックボックス (□) を付けてください。"
    )
}
