//! The declarative stand-by record table schema.
//!
//! One ordered list of row specifications drives the table emitter. The
//! visual contract is fixed: every row is either a single label/content
//! pair (content merged across the remaining three grid columns), two
//! label/content pairs sharing one row, or a full-width multi-line
//! narrative cell.

use crate::standby::SupervisionDocData;

/// Selects one flat field of [`SupervisionDocData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ProjectName,
    ConstructionUnit,
    StandbyUnit,
    SupervisionCompany,
    /// Computed: `起 至 止` from the start/end datetimes.
    StandbyTime,
    WorkOverview,
    PreWorkCheck,
    SupervisingPersonnel,
    OnSitePersonnel,
    IssuesAndOpinions,
    RectificationStatus,
    ConstructionEnterprise,
    SupervisingEnterprise,
    SupervisingOrganization,
    Remarks,
}

impl Field {
    /// Resolve the field to its display string. Absent fields resolve to
    /// the empty string — never a "null"/"undefined" literal.
    pub fn value(self, data: &SupervisionDocData) -> String {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();
        match self {
            Field::ProjectName => opt(&data.project_name),
            Field::ConstructionUnit => opt(&data.construction_unit),
            Field::StandbyUnit => opt(&data.standby_unit),
            Field::SupervisionCompany => opt(&data.supervision_company),
            Field::StandbyTime => format!(
                "{} 至 {}",
                crate::standby::format_datetime(data.start_datetime.as_deref()),
                crate::standby::format_datetime(data.end_datetime.as_deref()),
            ),
            Field::WorkOverview => opt(&data.work_overview),
            Field::PreWorkCheck => opt(&data.pre_work_check_content),
            Field::SupervisingPersonnel => opt(&data.supervising_personnel),
            Field::OnSitePersonnel => opt(&data.on_site_supervising_personnel),
            Field::IssuesAndOpinions => opt(&data.issues_and_opinions),
            Field::RectificationStatus => opt(&data.rectification_status),
            Field::ConstructionEnterprise => opt(&data.construction_enterprise),
            Field::SupervisingEnterprise => opt(&data.supervising_enterprise),
            Field::SupervisingOrganization => opt(&data.supervising_organization),
            Field::Remarks => opt(&data.remarks),
        }
    }
}

/// One row of the main table.
#[derive(Debug, Clone, Copy)]
pub enum RowSpec {
    /// `label | content (spans 3 columns)`
    Single { label: &'static str, field: Field },
    /// `label | content | label | content`
    Pair {
        left_label: &'static str,
        left: Field,
        right_label: &'static str,
        right: Field,
    },
    /// `label | narrative content (spans 3 columns, taller margins)`
    Multiline { label: &'static str, field: Field },
}

impl RowSpec {
    /// Number of cells this row contributes.
    pub fn cell_count(&self) -> usize {
        match self {
            RowSpec::Single { .. } | RowSpec::Multiline { .. } => 2,
            RowSpec::Pair { .. } => 4,
        }
    }
}

/// The fixed main-table layout of the stand-by record document.
pub const STANDBY_SCHEMA: &[RowSpec] = &[
    RowSpec::Single {
        label: "项目名称",
        field: Field::ProjectName,
    },
    RowSpec::Pair {
        left_label: "施工单位",
        left: Field::ConstructionUnit,
        right_label: "旁站单位",
        right: Field::StandbyUnit,
    },
    RowSpec::Single {
        label: "监理公司",
        field: Field::SupervisionCompany,
    },
    RowSpec::Single {
        label: "旁站时间",
        field: Field::StandbyTime,
    },
    RowSpec::Multiline {
        label: "工作概述",
        field: Field::WorkOverview,
    },
    RowSpec::Multiline {
        label: "施工前检查内容",
        field: Field::PreWorkCheck,
    },
    RowSpec::Pair {
        left_label: "监理人员",
        left: Field::SupervisingPersonnel,
        right_label: "现场监理人员",
        right: Field::OnSitePersonnel,
    },
    RowSpec::Multiline {
        label: "发现问题及意见",
        field: Field::IssuesAndOpinions,
    },
    RowSpec::Single {
        label: "整改状态",
        field: Field::RectificationStatus,
    },
    RowSpec::Pair {
        left_label: "施工企业",
        left: Field::ConstructionEnterprise,
        right_label: "监理企业",
        right: Field::SupervisingEnterprise,
    },
    RowSpec::Single {
        label: "监理组织",
        field: Field::SupervisingOrganization,
    },
    RowSpec::Multiline {
        label: "备注",
        field: Field::Remarks,
    },
];

/// Signature block rows: label pairs with empty fillable cells between.
pub const SIGNATURE_ROWS: &[(&str, &str)] = &[
    ("监理工程师签字", "日期"),
    ("施工单位项目经理签字", "日期"),
];

/// Total cell count of the main table (used by layout tests).
pub fn main_table_cell_count() -> usize {
    STANDBY_SCHEMA.iter().map(RowSpec::cell_count).sum()
}

/// Total cell count of the signature table.
pub fn signature_table_cell_count() -> usize {
    SIGNATURE_ROWS.len() * 4
}
