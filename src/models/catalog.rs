/// A movie matched in the external catalog
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogMovie {
    pub id: u64,
    pub title: String,
    pub year: Option<i32>,
}
