//! URL construction for PostgREST requests. Kept free of I/O so the
//! query grammar can be tested on the host.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    fn suffix(self) -> &'static str {
        match self {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        }
    }
}

/// A `select` against one table: column list, `eq` filters, ordering and
/// a row limit, rendered in PostgREST's query-string grammar.
#[derive(Debug, Clone, PartialEq)]
pub struct TableQuery {
    table: String,
    select: String,
    filters: Vec<(String, String)>,
    order: Option<(String, Direction)>,
    limit: Option<u32>,
}

impl TableQuery {
    pub fn from(table: &str) -> Self {
        Self {
            table: table.to_string(),
            select: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.select = columns.to_string();
        self
    }

    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.filters.push((column.to_string(), value.to_string()));
        self
    }

    pub fn order(mut self, column: &str, direction: Direction) -> Self {
        self.order = Some((column.to_string(), direction));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Renders the full request URL under the given REST base, e.g.
    /// `{base}/reviews?select=*&renter_id=eq.r1&order=created_at.desc`.
    pub fn to_url(&self, rest_base: &str) -> String {
        let mut url = format!("{}/{}?select={}", rest_base, self.table, self.select);
        for (column, value) in &self.filters {
            url.push_str(&format!("&{}=eq.{}", column, urlencoding::encode(value)));
        }
        if let Some((column, direction)) = &self.order {
            url.push_str(&format!("&order={}.{}", column, direction.suffix()));
        }
        if let Some(limit) = self.limit {
            url.push_str(&format!("&limit={limit}"));
        }
        url
    }
}

/// URL for a mutation (insert or update) against one table, with the
/// same `eq` filter grammar as reads.
pub fn mutation_url(rest_base: &str, table: &str, filters: &[(&str, &str)]) -> String {
    let mut url = format!("{rest_base}/{table}");
    let mut separator = '?';
    for (column, value) in filters {
        url.push_str(&format!(
            "{separator}{column}=eq.{}",
            urlencoding::encode(value)
        ));
        separator = '&';
    }
    url
}
