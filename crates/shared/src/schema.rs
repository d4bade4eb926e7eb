//! Ordered company field schema shared by the form, details and comparison
//! renderers. Keys must stay in lockstep with the backend's record keys.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Date,
    MultiLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const fn field(key: &'static str, label: &'static str, kind: FieldKind) -> FieldDef {
    FieldDef {
        key,
        label,
        kind,
        required: false,
    }
}

pub const NAME_KEY: &str = "companyName";
pub const FOUNDED_DATE_KEY: &str = "foundedDate";
pub const EMPLOYEES_KEY: &str = "employees";

pub const COMPANY_FIELDS: &[FieldDef] = &[
    FieldDef {
        key: NAME_KEY,
        label: "Company name",
        kind: FieldKind::Text,
        required: true,
    },
    field("corporatePhilosophy", "Corporate philosophy", FieldKind::Text),
    field("ceoName", "Representative", FieldKind::Text),
    field("headquarters", "Headquarters", FieldKind::Text),
    field(FOUNDED_DATE_KEY, "Founded", FieldKind::Date),
    field(EMPLOYEES_KEY, "Employees", FieldKind::Number),
    field("majorClients", "Major clients", FieldKind::Text),
    field("capital", "Capital (10k JPY)", FieldKind::Number),
    field("sales", "Sales (10k JPY)", FieldKind::Number),
    field("roe", "Equity ratio (ROE) (%)", FieldKind::Number),
    field(
        "operatingProfitMargin",
        "Ordinary profit margin (%)",
        FieldKind::Number,
    ),
    field("mainBusiness", "Main business", FieldKind::Text),
    field("strengths", "Strengths", FieldKind::MultiLine),
    field("weaknesses", "Weaknesses", FieldKind::MultiLine),
    field("targetCustomers", "Target customers", FieldKind::Text),
    field("idealCandidate", "Ideal candidate", FieldKind::MultiLine),
    field("recruitingPositions", "Open positions", FieldKind::Text),
    field("hiringCount", "Planned hires", FieldKind::Number),
    field("startingSalary", "Starting salary (JPY)", FieldKind::Number),
    field("bonus", "Bonus", FieldKind::Text),
    field("workLocation", "Work location", FieldKind::Text),
    field(
        "workingHours",
        "Working hours (monthly overtime)",
        FieldKind::Text,
    ),
    field("annualHolidays", "Annual holidays", FieldKind::Number),
    field("benefits", "Benefits", FieldKind::MultiLine),
    field("turnoverRate", "Turnover rate (%)", FieldKind::Number),
    field("averageAge", "Average age", FieldKind::Number),
    field(
        "averageAnnualSalary",
        "Average annual salary (10k JPY)",
        FieldKind::Number,
    ),
    field("notes", "Notes", FieldKind::MultiLine),
];

pub fn field_def(key: &str) -> Option<&'static FieldDef> {
    COMPANY_FIELDS.iter().find(|f| f.key == key)
}

/// Rows of the comparison table. The name is the column header, so it is
/// not repeated as a row.
pub fn comparison_fields() -> impl Iterator<Item = &'static FieldDef> {
    COMPANY_FIELDS.iter().filter(|f| f.key != NAME_KEY)
}
