use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Life-cycle event kinds shared by every extraction call site.
///
/// The serialized tag is the value written to the `kind` column and hashed into
/// the event uid, so renaming a tag changes every event uid of that kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    OfficerHire,
    OfficerLeft,
    OfficerDept,
    OfficerRank,
    OfficerPayProgStart,
    #[serde(rename = "officer_level_1_cert")]
    OfficerLevel1Cert,
    #[serde(rename = "officer_pc_12_qualification")]
    OfficerPc12Qualification,
    ComplaintReceive,
    ComplaintIncident,
    InvestigationStart,
    InvestigationComplete,
    SuspensionStart,
    SuspensionEnd,
    UofIncident,
    UofReceive,
    AwardReceive,
    AwardRecommended,
    AppealReceive,
    AppealHearing,
    AppealDisposition,
    ClaimMade,
    ClaimReceive,
    ClaimClosed,
    ClaimOccur,
}

impl EventKind {
    pub const ALL: [EventKind; 24] = [
        Self::OfficerHire,
        Self::OfficerLeft,
        Self::OfficerDept,
        Self::OfficerRank,
        Self::OfficerPayProgStart,
        Self::OfficerLevel1Cert,
        Self::OfficerPc12Qualification,
        Self::ComplaintReceive,
        Self::ComplaintIncident,
        Self::InvestigationStart,
        Self::InvestigationComplete,
        Self::SuspensionStart,
        Self::SuspensionEnd,
        Self::UofIncident,
        Self::UofReceive,
        Self::AwardReceive,
        Self::AwardRecommended,
        Self::AppealReceive,
        Self::AppealHearing,
        Self::AppealDisposition,
        Self::ClaimMade,
        Self::ClaimReceive,
        Self::ClaimClosed,
        Self::ClaimOccur,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OfficerHire => "officer_hire",
            Self::OfficerLeft => "officer_left",
            Self::OfficerDept => "officer_dept",
            Self::OfficerRank => "officer_rank",
            Self::OfficerPayProgStart => "officer_pay_prog_start",
            Self::OfficerLevel1Cert => "officer_level_1_cert",
            Self::OfficerPc12Qualification => "officer_pc_12_qualification",
            Self::ComplaintReceive => "complaint_receive",
            Self::ComplaintIncident => "complaint_incident",
            Self::InvestigationStart => "investigation_start",
            Self::InvestigationComplete => "investigation_complete",
            Self::SuspensionStart => "suspension_start",
            Self::SuspensionEnd => "suspension_end",
            Self::UofIncident => "uof_incident",
            Self::UofReceive => "uof_receive",
            Self::AwardReceive => "award_receive",
            Self::AwardRecommended => "award_recommended",
            Self::AppealReceive => "appeal_receive",
            Self::AppealHearing => "appeal_hearing",
            Self::AppealDisposition => "appeal_disposition",
            Self::ClaimMade => "claim_made",
            Self::ClaimReceive => "claim_receive",
            Self::ClaimClosed => "claim_closed",
            Self::ClaimOccur => "claim_occur",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown event kind: {s}"))
    }
}
