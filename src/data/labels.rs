use serde::Deserialize;

// ---------------------------------------------------------------------------
// Lookup tables: raw code → human-readable label
// ---------------------------------------------------------------------------

type LabelTable = &'static [(&'static str, &'static str)];

const SENIORITY_EN: LabelTable = &[
    ("EN", "Entry"),
    ("MI", "Mid"),
    ("SE", "Senior"),
    ("EX", "Executive"),
];
const SENIORITY_PT: LabelTable = &[
    ("EN", "Entrada"),
    ("MI", "Intermediário"),
    ("SE", "Sênior"),
    ("EX", "Executivo"),
];

const CONTRACT_EN: LabelTable = &[
    ("FT", "Full-time"),
    ("PT", "Part-time"),
    ("CT", "Contractor"),
    ("FL", "Freelancer"),
];
const CONTRACT_PT: LabelTable = &[
    ("FT", "Tempo Integral"),
    ("PT", "Tempo Parcial"),
    ("CT", "Contratado"),
    ("FL", "Freelancer"),
];

const COMPANY_SIZE_EN: LabelTable = &[("S", "Small"), ("M", "Medium"), ("L", "Large")];
const COMPANY_SIZE_PT: LabelTable = &[("S", "Pequena"), ("M", "Média"), ("L", "Grande")];

/// Remote ratios are numeric in the source (`0`, `50`, `100`).
const REMOTE_EN: &[(f64, &str)] = &[(0.0, "On-site"), (50.0, "Hybrid"), (100.0, "Remote")];
const REMOTE_PT: &[(f64, &str)] = &[(0.0, "Presencial"), (50.0, "Híbrido"), (100.0, "Remoto")];

/// Look up `code` in `table`, falling back to the code itself.
pub fn relabel(table: LabelTable, code: &str) -> String {
    table
        .iter()
        .find(|(raw, _)| *raw == code)
        .map(|(_, label)| (*label).to_string())
        .unwrap_or_else(|| code.to_string())
}

/// Whether `relabel` would find a label for `code`.
fn is_known(table: LabelTable, code: &str) -> bool {
    table.iter().any(|(raw, _)| *raw == code)
}

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

/// Language used for categorical labels and UI headings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Vocabulary {
    #[default]
    #[serde(alias = "en")]
    English,
    #[serde(alias = "pt", alias = "pt-br")]
    Portuguese,
}

impl Vocabulary {
    fn seniority_table(self) -> LabelTable {
        match self {
            Vocabulary::English => SENIORITY_EN,
            Vocabulary::Portuguese => SENIORITY_PT,
        }
    }

    fn contract_table(self) -> LabelTable {
        match self {
            Vocabulary::English => CONTRACT_EN,
            Vocabulary::Portuguese => CONTRACT_PT,
        }
    }

    fn company_size_table(self) -> LabelTable {
        match self {
            Vocabulary::English => COMPANY_SIZE_EN,
            Vocabulary::Portuguese => COMPANY_SIZE_PT,
        }
    }

    pub fn seniority(self, code: &str) -> String {
        relabel(self.seniority_table(), code)
    }

    pub fn contract_type(self, code: &str) -> String {
        relabel(self.contract_table(), code)
    }

    pub fn company_size(self, code: &str) -> String {
        relabel(self.company_size_table(), code)
    }

    /// Map a raw `remote_ratio` cell to its label.
    ///
    /// The cell is compared numerically, so `"50"` and `"50.0"` both match.
    /// Anything else (including ratios such as `"25"`) is returned verbatim.
    pub fn remote_type(self, raw: &str) -> String {
        let table = match self {
            Vocabulary::English => REMOTE_EN,
            Vocabulary::Portuguese => REMOTE_PT,
        };
        raw.trim()
            .parse::<f64>()
            .ok()
            .and_then(|ratio| table.iter().find(|(known, _)| *known == ratio))
            .map(|(_, label)| (*label).to_string())
            .unwrap_or_else(|| raw.to_string())
    }

    /// Whether `code` has a seniority label.
    /// The loader uses these to report unmapped values.
    pub fn knows_seniority(self, code: &str) -> bool {
        is_known(self.seniority_table(), code)
    }

    pub fn knows_contract_type(self, code: &str) -> bool {
        is_known(self.contract_table(), code)
    }

    pub fn knows_company_size(self, code: &str) -> bool {
        is_known(self.company_size_table(), code)
    }

    /// Normalized field names, in [`SalaryRecord::cells`] order.
    ///
    /// [`SalaryRecord::cells`]: super::model::SalaryRecord::cells
    pub fn field_names(self) -> [&'static str; 11] {
        match self {
            Vocabulary::English => [
                "year",
                "seniority",
                "contract_type",
                "job_title",
                "salary_local",
                "currency",
                "salary_usd",
                "residence",
                "remote_type",
                "company_location",
                "company_size",
            ],
            Vocabulary::Portuguese => [
                "ano",
                "senioridade",
                "contrato",
                "cargo",
                "salario",
                "moeda",
                "usd",
                "residencia",
                "remoto",
                "empresa",
                "tamanho_empresa",
            ],
        }
    }

    /// UI strings.
    pub fn text(self, key: UiText) -> &'static str {
        use UiText::*;
        match (self, key) {
            (Vocabulary::English, Title) => "Salary Dashboard",
            (Vocabulary::Portuguese, Title) => "Dashboard Salarial",
            (Vocabulary::English, Filters) => "Filters",
            (Vocabulary::Portuguese, Filters) => "Filtros",
            (Vocabulary::English, Year) => "Year",
            (Vocabulary::Portuguese, Year) => "Ano",
            (Vocabulary::English, Seniority) => "Seniority",
            (Vocabulary::Portuguese, Seniority) => "Senioridade",
            (Vocabulary::English, WorkType) => "Work type",
            (Vocabulary::Portuguese, WorkType) => "Tipo de trabalho",
            (Vocabulary::English, Overview) => "Overview",
            (Vocabulary::Portuguese, Overview) => "Visão Geral",
            (Vocabulary::English, TotalRecords) => "Total records",
            (Vocabulary::Portuguese, TotalRecords) => "Total de registros",
            (Vocabulary::English, MeanSalary) => "Mean salary (USD)",
            (Vocabulary::Portuguese, MeanSalary) => "Salário médio (USD)",
            (Vocabulary::English, MaxSalary) => "Highest salary (USD)",
            (Vocabulary::Portuguese, MaxSalary) => "Maior salário (USD)",
            (Vocabulary::English, Analyses) => "Analyses",
            (Vocabulary::Portuguese, Analyses) => "Análises",
            (Vocabulary::English, BySeniority) => "Mean salary by seniority",
            (Vocabulary::Portuguese, BySeniority) => "Salário médio por senioridade",
            (Vocabulary::English, ByWorkType) => "Mean salary by work type",
            (Vocabulary::Portuguese, ByWorkType) => "Salário médio por tipo de trabalho",
            (Vocabulary::English, ByYear) => "Salary evolution over the years",
            (Vocabulary::Portuguese, ByYear) => "Evolução salarial ao longo dos anos",
            (Vocabulary::English, FilteredData) => "Filtered data",
            (Vocabulary::Portuguese, FilteredData) => "Dados filtrados",
            (Vocabulary::English, NoData) => "No data for the current selection",
            (Vocabulary::Portuguese, NoData) => "Sem dados para a seleção atual",
            (Vocabulary::English, SelectAll) => "All",
            (Vocabulary::Portuguese, SelectAll) => "Todos",
            (Vocabulary::English, SelectNone) => "None",
            (Vocabulary::Portuguese, SelectNone) => "Nenhum",
            (Vocabulary::English, Missing) => "(missing)",
            (Vocabulary::Portuguese, Missing) => "(ausente)",
            (Vocabulary::English, FileMenu) => "File",
            (Vocabulary::Portuguese, FileMenu) => "Arquivo",
            (Vocabulary::English, Open) => "Open…",
            (Vocabulary::Portuguese, Open) => "Abrir…",
            (Vocabulary::English, OpenDialogTitle) => "Open salary data",
            (Vocabulary::Portuguese, OpenDialogTitle) => "Abrir dados salariais",
            (Vocabulary::English, SupportedFiles) => "Supported files",
            (Vocabulary::Portuguese, SupportedFiles) => "Arquivos suportados",
            (Vocabulary::English, Error) => "Error",
            (Vocabulary::Portuguese, Error) => "Erro",
        }
    }

    /// "N records loaded, M visible" with pre-formatted counts.
    pub fn records_summary(self, loaded: &str, visible: &str) -> String {
        match self {
            Vocabulary::English => format!("{loaded} records loaded, {visible} visible"),
            Vocabulary::Portuguese => format!("{loaded} registros carregados, {visible} visíveis"),
        }
    }

    pub fn top_titles_heading(self, limit: usize) -> String {
        match self {
            Vocabulary::English => format!("Top {limit} paying job titles"),
            Vocabulary::Portuguese => format!("Top {limit} cargos mais bem pagos"),
        }
    }
}

/// Keys for translated UI strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiText {
    Title,
    Filters,
    Year,
    Seniority,
    WorkType,
    Overview,
    TotalRecords,
    MeanSalary,
    MaxSalary,
    Analyses,
    BySeniority,
    ByWorkType,
    ByYear,
    FilteredData,
    NoData,
    SelectAll,
    SelectNone,
    /// Filter option shown for an empty label.
    Missing,
    FileMenu,
    Open,
    OpenDialogTitle,
    SupportedFiles,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_are_translated() {
        let v = Vocabulary::English;
        assert_eq!(v.seniority("EN"), "Entry");
        assert_eq!(v.seniority("EX"), "Executive");
        assert_eq!(v.contract_type("CT"), "Contractor");
        assert_eq!(v.company_size("M"), "Medium");
        assert_eq!(v.remote_type("0"), "On-site");
        assert_eq!(v.remote_type("50"), "Hybrid");
        assert_eq!(v.remote_type("100"), "Remote");
    }

    #[test]
    fn unknown_codes_pass_through_verbatim() {
        let v = Vocabulary::English;
        assert_eq!(v.seniority("XX"), "XX");
        assert_eq!(v.contract_type("ft"), "ft");
        assert_eq!(v.company_size(""), "");
        assert_eq!(v.remote_type("25"), "25");
        assert_eq!(v.remote_type("remote"), "remote");
    }

    #[test]
    fn remote_ratio_is_compared_numerically() {
        assert_eq!(Vocabulary::English.remote_type("100.0"), "Remote");
        assert_eq!(Vocabulary::English.remote_type(" 50 "), "Hybrid");
    }

    #[test]
    fn portuguese_vocabulary() {
        let v = Vocabulary::Portuguese;
        assert_eq!(v.seniority("SE"), "Sênior");
        assert_eq!(v.contract_type("FT"), "Tempo Integral");
        assert_eq!(v.company_size("S"), "Pequena");
        assert_eq!(v.remote_type("50"), "Híbrido");
        assert_eq!(v.seniority("??"), "??");
    }

    #[test]
    fn controls_follow_the_vocabulary() {
        let en = Vocabulary::English;
        let pt = Vocabulary::Portuguese;
        assert_eq!(en.text(UiText::SelectAll), "All");
        assert_eq!(pt.text(UiText::SelectAll), "Todos");
        assert_eq!(pt.text(UiText::SelectNone), "Nenhum");
        assert_eq!(pt.text(UiText::FileMenu), "Arquivo");
        assert_eq!(pt.text(UiText::Open), "Abrir…");
        assert_eq!(pt.text(UiText::Missing), "(ausente)");
        assert_eq!(en.records_summary("1,234", "56"), "1,234 records loaded, 56 visible");
        assert_eq!(pt.records_summary("1.234", "56"), "1.234 registros carregados, 56 visíveis");
        assert_eq!(en.top_titles_heading(10), "Top 10 paying job titles");
        assert_eq!(pt.top_titles_heading(5), "Top 5 cargos mais bem pagos");
    }

    #[test]
    fn vocabulary_parses_from_toml_aliases() {
        #[derive(Deserialize)]
        struct Wrapper {
            vocabulary: Vocabulary,
        }
        let w: Wrapper = toml::from_str(r#"vocabulary = "pt""#).unwrap();
        assert_eq!(w.vocabulary, Vocabulary::Portuguese);
        let w: Wrapper = toml::from_str(r#"vocabulary = "english""#).unwrap();
        assert_eq!(w.vocabulary, Vocabulary::English);
    }
}
