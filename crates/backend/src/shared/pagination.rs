use axum::http::Uri;
use contracts::shared::{ListResponse, Page};

use super::api_error::{ApiError, ApiResult};

pub const INVALID_PAGE: &str = "Página inválida.";

/// Cuts one page out of `items`.
///
/// `page` is the raw `?page=` value, 1-based. A zero `page_size` turns
/// pagination off and returns the bare list. Page 1 always exists, even for
/// an empty list; any other page past the end is a 404.
pub fn paginate<T>(
    items: Vec<T>,
    page: Option<&str>,
    page_size: u64,
    uri: &Uri,
) -> ApiResult<ListResponse<T>> {
    if page_size == 0 {
        return Ok(ListResponse::Bare(items));
    }

    let count = items.len() as u64;
    let num_pages = count.div_ceil(page_size).max(1);
    let number = match page {
        None => 1,
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|n| (1..=num_pages).contains(n))
            .ok_or_else(|| ApiError::NotFound(INVALID_PAGE.to_string()))?,
    };

    let start = ((number - 1) * page_size) as usize;
    let results: Vec<T> = items
        .into_iter()
        .skip(start)
        .take(page_size as usize)
        .collect();

    Ok(ListResponse::Paginated(Page {
        count,
        next: (number < num_pages).then(|| page_link(uri, number + 1)),
        previous: (number > 1).then(|| page_link(uri, number - 1)),
        results,
    }))
}

/// Same path and query with `page` replaced; page 1 drops the parameter.
fn page_link(uri: &Uri, number: u64) -> String {
    let page_pair = format!("page={}", number);
    let mut pairs: Vec<&str> = uri
        .query()
        .unwrap_or("")
        .split('&')
        .filter(|p| !p.is_empty() && !p.starts_with("page="))
        .collect();
    if number > 1 {
        pairs.push(&page_pair);
    }
    if pairs.is_empty() {
        uri.path().to_string()
    } else {
        format!("{}?{}", uri.path(), pairs.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri(s: &str) -> Uri {
        s.parse().unwrap()
    }

    fn page_of(resp: ListResponse<u32>) -> Page<u32> {
        match resp {
            ListResponse::Paginated(page) => page,
            ListResponse::Bare(_) => panic!("expected a page"),
        }
    }

    #[test]
    fn test_zero_page_size_is_bare() {
        let resp = paginate(vec![1, 2, 3], None, 0, &uri("/api/x/")).unwrap();
        assert_eq!(resp, ListResponse::Bare(vec![1, 2, 3]));
    }

    #[test]
    fn test_pages_and_links() {
        let items: Vec<u32> = (1..=5).collect();
        let u = uri("/api/productos/?search=ibu&page=2");

        let page = page_of(paginate(items.clone(), Some("2"), 2, &u).unwrap());
        assert_eq!(page.count, 5);
        assert_eq!(page.results, vec![3, 4]);
        assert_eq!(page.next.as_deref(), Some("/api/productos/?search=ibu&page=3"));
        assert_eq!(page.previous.as_deref(), Some("/api/productos/?search=ibu"));

        let last = page_of(paginate(items, Some("3"), 2, &u).unwrap());
        assert_eq!(last.results, vec![5]);
        assert!(last.next.is_none());
    }

    #[test]
    fn test_empty_list_has_page_one_only() {
        let u = uri("/api/proveedores/");
        let page = page_of(paginate(Vec::<u32>::new(), None, 20, &u).unwrap());
        assert_eq!(page.count, 0);
        assert!(page.next.is_none() && page.previous.is_none());

        assert!(paginate(Vec::<u32>::new(), Some("2"), 20, &u).is_err());
        assert!(paginate(vec![1u32], Some("0"), 20, &u).is_err());
        assert!(paginate(vec![1u32], Some("abc"), 20, &u).is_err());
    }
}
