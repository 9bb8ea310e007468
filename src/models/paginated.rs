/// One page of a paginated feed.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedResponse<T> {
    pub data: T,
    pub next_page: Option<u32>,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: T, next_page: Option<u32>) -> Self {
        Self { data, next_page }
    }

    pub fn has_more(&self) -> bool {
        self.next_page.is_some()
    }
}

impl<T> PaginatedResponse<Vec<T>> {
    pub fn extend(&mut self, later: PaginatedResponse<Vec<T>>) {
        self.data.extend(later.data);
        self.next_page = later.next_page;
    }
}
