use std::{env, future::Future, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{model::ForecastResponse, ApiError, Gubun};

pub const FORECAST_API_URL: &str =
    "https://apis.data.go.kr/1192136/fcstFishing/GetFcstFishingApiService";

pub const DEFAULT_ROWS_PER_PAGE: u32 = 1000;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastApiCredentials {
    /// Passed as issued by the portal, which is already percent-encoded.
    pub service_key: String,
    pub proxy: Option<String>,
    pub accept_invalid_certs: bool,
    pub rows_per_page: u32,
}

fn env_flag(name: &str) -> bool {
    env::var(name).is_ok_and(|value| {
        matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes"
        )
    })
}

impl ForecastApiCredentials {
    pub fn new<S: Into<String>>(service_key: S) -> Self {
        Self {
            service_key: service_key.into(),
            proxy: None,
            accept_invalid_certs: false,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }

    /// `None` without `FORECAST_SERVICE_KEY`.
    pub fn from_env() -> Option<Self> {
        let service_key = env::var("FORECAST_SERVICE_KEY").ok()?;
        let rows_per_page = env::var("FORECAST_ROWS_PER_PAGE")
            .ok()
            .and_then(|rows| rows.trim().parse().ok())
            .filter(|rows| *rows > 0)
            .unwrap_or(DEFAULT_ROWS_PER_PAGE);
        Some(Self {
            service_key,
            proxy: env::var("FORECAST_PROXY").ok(),
            accept_invalid_certs: env_flag("FORECAST_ACCEPT_INVALID_CERTS"),
            rows_per_page,
        })
    }
}

pub struct ForecastApiClient {
    pub credentials: ForecastApiCredentials,
    client: reqwest::Client,
}

impl ForecastApiClient {
    pub fn new(credentials: &ForecastApiCredentials) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder().timeout(REQUEST_TIMEOUT);
        if let Some(proxy_url) = &credentials.proxy {
            log::info!("using proxy '{proxy_url}'");
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }
        if credentials.accept_invalid_certs {
            log::warn!("certificate validation is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }
        Ok(Self {
            credentials: credentials.clone(),
            client: builder.build()?,
        })
    }

    /// Fetches one page of a category.
    pub async fn get_page(&self, gubun: Gubun, page_no: u32) -> Result<ForecastResponse, ApiError> {
        log::info!("requesting {gubun} page {page_no}");

        // appended by hand, the query builder would encode the key a second time
        let url = format!("{FORECAST_API_URL}?serviceKey={}", self.credentials.service_key);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("gubun", gubun.label().to_owned()),
                ("type", "json".to_owned()),
                ("numOfRows", self.credentials.rows_per_page.to_string()),
                ("pageNo", page_no.to_string()),
            ])
            .send()
            .await?;

        match response.status() {
            reqwest::StatusCode::OK => parse_page(&response.text().await?),
            other => Err(ApiError::InvalidResponse {
                status_code: other,
                url: FORECAST_API_URL.to_owned(),
                response: response.text().await.ok(),
            }),
        }
    }

    /// Fetches every page of a category into a single response.
    pub async fn fetch_all(&self, gubun: Gubun) -> Result<ForecastResponse, ApiError> {
        let response = collect_pages(self.credentials.rows_per_page, move |page_no| {
            self.get_page(gubun, page_no)
        })
        .await?;
        log::info!("fetched {} items of {gubun}", response.items().len());
        Ok(response)
    }
}

fn parse_page(text: &str) -> Result<ForecastResponse, ApiError> {
    let response: ForecastResponse = serde_json::from_str(text).map_err(|why| {
        log::error!("unexpected response: {}", text.chars().take(500).collect::<String>());
        ApiError::from(why)
    })?;
    if let Some(header) = &response.response.header {
        if !header.is_success() {
            return Err(ApiError::Service {
                code: header.result_code.clone().unwrap_or_default(),
                message: header.result_msg.clone().unwrap_or_default(),
            });
        }
    }
    Ok(response)
}

/// Requests pages starting at 1 until `totalCount` items are collected or a
/// page comes back empty. Without a total, a short page is the last one.
pub async fn collect_pages<F, Fut>(rows_per_page: u32, mut fetch: F) -> Result<ForecastResponse, ApiError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<ForecastResponse, ApiError>>,
{
    let mut items = Vec::new();
    let mut total_count = None;
    let mut page_no = 1;

    loop {
        let page = fetch(page_no).await?;
        total_count = total_count.or(page.total_count());
        let page_items = page.into_items();
        let received = page_items.len();
        log::debug!("page {page_no}: {received} items");
        if received == 0 {
            break;
        }
        items.extend(page_items);

        let done = match total_count {
            Some(total) => items.len() as u64 >= total,
            None => received < rows_per_page as usize,
        };
        if done {
            break;
        }
        page_no += 1;
    }

    Ok(ForecastResponse::from_items(items, total_count))
}
