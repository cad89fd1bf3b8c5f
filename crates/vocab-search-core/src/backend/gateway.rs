//! Search gateway: request URL construction and response decoding

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{ResourceDocument, SearchDocument, SearchMeta, SearchPage, SearchRequest};
use crate::error::{Result, SearchBarError};
use crate::pagination::PaginationMetadata;
use crate::records::SearchHit;

/// Sort direction encoded by a sort specifier's sign
fn sort_order(sort: &str) -> Option<&'static str> {
    if sort.starts_with('-') {
        Some("desc")
    } else if !sort.is_empty() {
        Some("asc")
    } else {
        None
    }
}

fn strip_sort(sort: &str) -> &str {
    sort.strip_prefix('+')
        .or_else(|| sort.strip_prefix('-'))
        .unwrap_or(sort)
}

/// `pref-label` -> `prefLabel`
fn kebab_to_camel(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match chars.peek().copied() {
            Some(next) if c == '-' && (next.is_alphanumeric() || next == '_') => {
                out.extend(next.to_uppercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}

/// The `sort[<field>]=<asc|desc>` parameter for a sort specifier, if any
pub fn sort_param(sort: &str) -> Option<(String, &'static str)> {
    let order = sort_order(sort)?;
    let field = strip_sort(sort);
    if field.is_empty() {
        return None;
    }
    Some((format!("sort[{}]", kebab_to_camel(field)), order))
}

/// Parse `host` and append `segments` to its path
pub(crate) fn endpoint_url(host: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(host).map_err(|e| SearchBarError::invalid_endpoint(host, e))?;
    if url.cannot_be_a_base() {
        return Err(SearchBarError::invalid_endpoint(host, "not a base URL"));
    }
    let path = format!(
        "{}/{}",
        url.path().trim_end_matches('/'),
        segments.join("/")
    );
    url.set_path(&path);
    url.set_query(None);
    Ok(url)
}

/// Build `{host}/{index}/search?page[size]=..&page[number]=..&...`
pub fn search_url(host: &str, request: &SearchRequest<'_>) -> Result<Url> {
    let mut url = endpoint_url(host, &[request.index, "search"])?;
    {
        let mut params = url.query_pairs_mut();
        params
            .append_pair("page[size]", &request.size.to_string())
            .append_pair("page[number]", &request.page.to_string())
            .append_pair("highlight[:fields:]", "*");

        for (key, value) in request.filter.iter() {
            params.append_pair(&format!("filter[{key}]"), value);
        }

        if let Some((key, order)) = request.sort.and_then(sort_param) {
            params.append_pair(&key, order);
        }
    }
    Ok(url)
}

async fn get_json<D: DeserializeOwned>(client: &reqwest::Client, url: Url) -> Result<D> {
    let url_text = url.to_string();
    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(|source| SearchBarError::Http {
            url: url_text.clone(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(SearchBarError::Status {
            url: url_text,
            status: status.as_u16(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|source| SearchBarError::Http {
            url: url_text.clone(),
            source,
        })?;

    serde_json::from_str(&body).map_err(|source| SearchBarError::Decode {
        url: url_text,
        source,
    })
}

/// Run a search against `host` and map every hit through `row_mapper`.
///
/// Transport, status and decode failures propagate to the caller.
pub async fn search<T, F>(
    client: &reqwest::Client,
    host: &str,
    request: &SearchRequest<'_>,
    row_mapper: F,
) -> Result<SearchPage<T>>
where
    F: FnMut(SearchHit) -> Result<T>,
{
    let url = search_url(host, request)?;
    debug!(%url, filters = request.filter.len(), "search_request");

    let document: SearchDocument = get_json(client, url).await?;
    let pagination = PaginationMetadata::compute(request.page, request.size, document.count);
    let content = document
        .data
        .into_iter()
        .map(row_mapper)
        .collect::<Result<Vec<_>>>()?;

    Ok(SearchPage {
        content,
        meta: SearchMeta {
            count: document.count,
            pagination,
        },
    })
}

/// Look up `{host}/{resource}?<filters>`
pub async fn fetch_resource(
    client: &reqwest::Client,
    host: &str,
    resource: &str,
    filters: &[(String, String)],
) -> Result<ResourceDocument> {
    let mut url = endpoint_url(host, &[resource])?;
    if !filters.is_empty() {
        url.query_pairs_mut().extend_pairs(filters);
    }
    debug!(%url, "resource_request");

    get_json(client, url).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{compile_filter, FilterExpression, SearchScope};

    fn query_pairs(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_sort_param() {
        assert_eq!(
            sort_param("-pref-label"),
            Some(("sort[prefLabel]".to_string(), "desc"))
        );
        assert_eq!(
            sort_param("+created"),
            Some(("sort[created]".to_string(), "asc"))
        );
        assert_eq!(sort_param("uri"), Some(("sort[uri]".to_string(), "asc")));
        assert_eq!(sort_param(""), None);
        assert_eq!(sort_param("-"), None);
    }

    #[test]
    fn test_kebab_to_camel() {
        assert_eq!(kebab_to_camel("source-dataset"), "sourceDataset");
        assert_eq!(kebab_to_camel("uri"), "uri");
        assert_eq!(kebab_to_camel("trailing-"), "trailing-");
    }

    #[test]
    fn test_search_url_parameters() {
        let filter = compile_filter(
            Some("cat"),
            &SearchScope::new().with_datasets(vec!["ds".into()]),
        );
        let request = SearchRequest {
            index: "concepts",
            page: 1,
            size: 15,
            sort: Some("-prefLabel"),
            filter: &filter,
        };

        let url = search_url("http://search.local", &request).unwrap();
        assert_eq!(url.path(), "/concepts/search");

        let pairs = query_pairs(&url);
        assert!(pairs.contains(&("page[size]".into(), "15".into())));
        assert!(pairs.contains(&("page[number]".into(), "1".into())));
        assert!(pairs.contains(&("highlight[:fields:]".into(), "*".into())));
        assert!(pairs.contains(&(
            "filter[:sqs:prefLabel.*,tagLabels]".into(),
            "(cat*|cat)".into()
        )));
        assert!(pairs.contains(&("filter[:terms:sourceDataset]".into(), "ds".into())));
        assert!(pairs.contains(&("sort[prefLabel]".into(), "desc".into())));
    }

    #[test]
    fn test_search_url_without_sort() {
        let filter = FilterExpression::new();
        let request = SearchRequest {
            index: "concepts",
            page: 0,
            size: 5,
            sort: Some(""),
            filter: &filter,
        };
        let url = search_url("http://search.local/", &request).unwrap();
        assert!(query_pairs(&url).iter().all(|(k, _)| !k.starts_with("sort[")));
    }

    #[test]
    fn test_endpoint_keeps_host_path_prefix() {
        let url = endpoint_url("http://host/api/", &["concepts", "search"]).unwrap();
        assert_eq!(url.path(), "/api/concepts/search");
    }

    #[test]
    fn test_endpoint_rejects_garbage() {
        let err = endpoint_url("not a url", &["concepts"]).unwrap_err();
        assert!(matches!(err, SearchBarError::InvalidEndpoint { .. }));
    }
}
