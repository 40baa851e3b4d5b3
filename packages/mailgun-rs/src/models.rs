use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct MailingList {
    pub address: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub members_count: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse {
    pub list: MailingList,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListMember {
    pub address: String,
    pub name: Option<String>,
    pub subscribed: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemberResponse {
    pub member: ListMember,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub id: Option<String>,
    pub message: Option<String>,
}
