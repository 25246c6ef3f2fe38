use serde::Serialize;
use utoipa::ToSchema;

// Bloco de paginação devolvido por todos os endpoints de listagem.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total_pages: i64,
    pub current_page: i64,
    // `null` na primeira e na última página, respectivamente.
    pub previous_page: Option<i64>,
    pub next_page: Option<i64>,
}

impl Pagination {
    /// Calcula o bloco a partir do total encontrado e dos parâmetros de
    /// página. `total_pages = ceil(total / limit)`.
    pub fn compute(total_found: i64, page: i64, limit: i64) -> Self {
        let total_pages = if limit > 0 {
            (total_found + limit - 1) / limit
        } else {
            0
        };

        Self {
            total_pages,
            current_page: page,
            previous_page: (page - 1 > 0).then(|| page - 1),
            next_page: (page + 1 <= total_pages).then(|| page + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_is_ceiling_of_total_over_limit() {
        assert_eq!(Pagination::compute(10, 1, 3).total_pages, 4);
        assert_eq!(Pagination::compute(9, 1, 3).total_pages, 3);
        assert_eq!(Pagination::compute(0, 1, 3).total_pages, 0);
    }

    #[test]
    fn first_page_has_no_previous() {
        let p = Pagination::compute(10, 1, 5);
        assert_eq!(p.previous_page, None);
        assert_eq!(p.next_page, Some(2));
    }

    #[test]
    fn last_page_has_no_next() {
        let p = Pagination::compute(10, 2, 5);
        assert_eq!(p.previous_page, Some(1));
        assert_eq!(p.next_page, None);
    }

    #[test]
    fn middle_page_has_both_neighbors() {
        let p = Pagination::compute(30, 2, 10);
        assert_eq!(p.previous_page, Some(1));
        assert_eq!(p.next_page, Some(3));
    }
}
