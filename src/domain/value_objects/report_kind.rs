/// The reports served by this backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// Leave requests overlapping the period
    LeaveAnalysis,
    /// On-call share of each staff member's assignments
    OnCallAnalysis,
    /// Overtime hours per staff member and department
    Overtime,
    /// How often assignments matched stated shift preferences
    ShiftPreference,
    /// Hours worked from check-in/check-out logs
    WorkHours,
    /// Shift assignment volume per calendar month
    MonthlyShifts,
}

impl ReportKind {
    pub const ALL: [ReportKind; 6] = [
        ReportKind::LeaveAnalysis,
        ReportKind::OnCallAnalysis,
        ReportKind::Overtime,
        ReportKind::ShiftPreference,
        ReportKind::WorkHours,
        ReportKind::MonthlyShifts,
    ];

    /// URL path segment under `/reports/`
    pub fn slug(&self) -> &'static str {
        match self {
            ReportKind::LeaveAnalysis => "leave-analysis",
            ReportKind::OnCallAnalysis => "oncall-analysis",
            ReportKind::Overtime => "overtime",
            ReportKind::ShiftPreference => "shift-preference",
            ReportKind::WorkHours => "work-hours",
            ReportKind::MonthlyShifts => "monthly-shifts",
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl std::str::FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| format!("Unknown report: {}", s))
    }
}
