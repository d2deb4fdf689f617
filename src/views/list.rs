use sitekit_core::PaginationMeta;

#[derive(Debug, Clone)]
pub struct RowView {
    pub cells: Vec<String>,
    /// Detail page of the row
    pub url: String,
}

#[derive(Debug, Clone, Default)]
pub struct PaginationView {
    pub page: i64,
    pub total_pages: i64,
    pub total: i64,
    pub prev_url: String,
    pub next_url: String,
}

impl PaginationView {
    /// Links keep the current `limit` and `order_by`; an empty URL means no link.
    pub fn new(meta: &PaginationMeta, base_url: &str, order_by: Option<&str>) -> Self {
        let link = |page: i64| {
            let mut url = format!("{base_url}?page={page}&limit={}", meta.limit);
            if let Some(order_by) = order_by.filter(|o| !o.is_empty()) {
                url.push_str("&order_by=");
                url.push_str(order_by);
            }
            url
        };

        Self {
            page: meta.page,
            total_pages: meta.total_pages,
            total: meta.total,
            prev_url: if meta.has_previous() {
                link(meta.page - 1)
            } else {
                String::new()
            },
            next_url: if meta.has_more {
                link(meta.page + 1)
            } else {
                String::new()
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListView {
    pub columns: Vec<&'static str>,
    pub rows: Vec<RowView>,
    /// Empty for read-only lists
    pub create_url: String,
    pub pagination: PaginationView,
}

#[derive(Debug, Clone)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct ActionView {
    pub label: &'static str,
    pub url: String,
    pub danger: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DetailView {
    pub rows: Vec<DetailRow>,
    pub actions: Vec<ActionView>,
}

impl DetailView {
    pub fn row(mut self, label: &'static str, value: impl Into<String>) -> Self {
        self.rows.push(DetailRow {
            label,
            value: value.into(),
        });
        self
    }

    pub fn action(mut self, label: &'static str, url: impl Into<String>) -> Self {
        self.actions.push(ActionView {
            label,
            url: url.into(),
            danger: false,
        });
        self
    }

    pub fn danger(mut self, label: &'static str, url: impl Into<String>) -> Self {
        self.actions.push(ActionView {
            label,
            url: url.into(),
            danger: true,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_links() {
        let meta = PaginationMeta::new(60, 25, 25);
        let view = PaginationView::new(&meta, "/admin/user/", Some("-email"));

        assert_eq!(view.page, 2);
        assert_eq!(view.prev_url, "/admin/user/?page=1&limit=25&order_by=-email");
        assert_eq!(view.next_url, "/admin/user/?page=3&limit=25&order_by=-email");
    }

    #[test]
    fn test_single_page_has_no_links() {
        let meta = PaginationMeta::new(3, 25, 0);
        let view = PaginationView::new(&meta, "/admin/post/", None);

        assert!(view.prev_url.is_empty());
        assert!(view.next_url.is_empty());
        assert_eq!(view.total_pages, 1);
    }
}
