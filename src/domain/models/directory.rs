use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Room {
    pub id: String,
    pub name: String,
}

/// A teacher under their canonical account id. Reconciling legacy profile ids
/// happens behind the directory port; the core never sees two namespaces.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Teacher {
    pub id: String,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Unpaid,
}

impl PaymentStatus {
    pub fn is_eligible(self) -> bool {
        matches!(self, PaymentStatus::Paid)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GroupMember {
    pub student_id: String,
    pub payment_status: PaymentStatus,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub members: Vec<GroupMember>,
}

impl Group {
    pub fn student_ids(&self) -> Vec<String> {
        self.members.iter().map(|m| m.student_id.clone()).collect()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: Option<String>,
}
