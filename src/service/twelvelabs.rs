//! Twelve Labs HTTP implementation of [`VideoService`].

use super::{CreateIndexRequest, SearchOptions, VideoService, VideoUpload};
use crate::config::{ApiKey, ApiSettings};
use crate::error::{Result, SnipError};
use crate::models::{Engine, Index, SearchQuery, SearchResult, UploadTask, Video, VideoStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio_util::io::ReaderStream;
use tracing::{debug, instrument, warn};

const API_KEY_HEADER: &str = "x-api-key";

/// Authenticated client for the Twelve Labs REST API.
pub struct TwelveLabsService {
    http: Client,
    api_key: ApiKey,
    base_url: String,
    page_limit: u32,
}

impl TwelveLabsService {
    /// Create a service client with the configured endpoint and request timeout.
    pub fn new(api_key: ApiKey, settings: &ApiSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| SnipError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key,
            base_url: format!(
                "{}/{}",
                settings.base_url.trim_end_matches('/'),
                settings.version.trim_matches('/')
            ),
            page_limit: settings.page_limit.max(1),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, action: &str) -> Result<T> {
        let response = request
            .header(API_KEY_HEADER, self.api_key.as_str())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(%status, bytes = body.len(), "{} responded", action);

        if !status.is_success() {
            return Err(error_from_response(status, &body, action));
        }

        serde_json::from_str(&body).map_err(|e| {
            SnipError::Service(format!("{} returned a malformed response: {}", action, e))
        })
    }

    /// Follow `page_info` until every page of a listing has been read.
    async fn get_all_pages<T: DeserializeOwned>(&self, path: &str, action: &str) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1u32;

        loop {
            let request = self.http.get(self.url(path)).query(&[
                ("page", page.to_string()),
                ("page_limit", self.page_limit.to_string()),
            ]);
            let response: WirePage<T> = self.send(request, action).await?;
            let received = response.data.len();
            items.extend(response.data);

            match response.page_info {
                Some(info) if received > 0 && info.page < info.total_page => page = info.page + 1,
                _ => break,
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl VideoService for TwelveLabsService {
    #[instrument(skip(self, request), fields(name = %request.name))]
    async fn create_index(&self, request: &CreateIndexRequest) -> Result<Index> {
        let body = WireCreateIndex {
            index_name: &request.name,
            engines: request
                .engines
                .iter()
                .map(|e| WireEngineRequest {
                    engine_name: e.as_str(),
                    engine_options: e.options(),
                })
                .collect(),
            addons: &request.addons,
        };

        let created: WireCreated = self
            .send(self.http.post(self.url("indexes")).json(&body), "Create index")
            .await?;

        Ok(Index {
            id: created.id,
            name: request.name.clone(),
            engines: request.engines.clone(),
            created_at: None,
            video_count: None,
        })
    }

    #[instrument(skip(self))]
    async fn get_index(&self, index_id: &str) -> Result<Index> {
        let index: WireIndex = self
            .send(self.http.get(self.url(&format!("indexes/{}", index_id))), "Get index")
            .await?;
        Ok(index.into_index())
    }

    #[instrument(skip(self))]
    async fn list_indexes(&self) -> Result<Vec<Index>> {
        let indexes: Vec<WireIndex> = self.get_all_pages("indexes", "List indexes").await?;
        Ok(indexes.into_iter().map(WireIndex::into_index).collect())
    }

    #[instrument(skip(self))]
    async fn list_videos(&self, index_id: &str) -> Result<Vec<Video>> {
        let videos: Vec<WireVideo> = self
            .get_all_pages(&format!("indexes/{}/videos", index_id), "List videos")
            .await?;
        Ok(videos
            .into_iter()
            .map(|v| v.into_video(index_id))
            .collect())
    }

    #[instrument(
        skip(self, upload),
        fields(index_id = %upload.index_id, filename = %upload.filename)
    )]
    async fn create_upload_task(&self, upload: &VideoUpload) -> Result<UploadTask> {
        let file = tokio::fs::File::open(&upload.path).await?;
        let body = Body::wrap_stream(ReaderStream::new(file));
        let video = Part::stream_with_length(body, upload.size).file_name(upload.filename.clone());
        let form = Form::new()
            .text("index_id", upload.index_id.clone())
            .text("language", upload.language.clone())
            .part("video_file", video);

        let created: WireCreatedTask = self
            .send(self.http.post(self.url("tasks")).multipart(form), "Upload video")
            .await?;

        Ok(UploadTask {
            id: created.id,
            index_id: upload.index_id.clone(),
            video_id: created.video_id,
            status: VideoStatus::Uploading,
            filename: upload.filename.clone(),
            duration: None,
        })
    }

    #[instrument(skip(self))]
    async fn get_upload_task(&self, task_id: &str) -> Result<UploadTask> {
        let task: WireTask = self
            .send(self.http.get(self.url(&format!("tasks/{}", task_id))), "Get task")
            .await?;
        Ok(task.into_task())
    }

    #[instrument(skip(self, query, options))]
    async fn search(
        &self,
        index_id: &str,
        query: &SearchQuery,
        options: &SearchOptions,
    ) -> Result<Vec<SearchResult>> {
        let modality = query
            .modality()
            .ok_or_else(|| SnipError::validation("query", "text or image is required"))?;

        let mut form = Form::new()
            .text("index_id", index_id.to_string())
            .text("page_limit", options.page_limit.to_string())
            .text("threshold", options.threshold.clone());
        for option in &options.modalities {
            form = form.text("search_options", option.clone());
        }
        if let Some(text) = query.text.as_deref().filter(|t| !t.trim().is_empty()) {
            form = form.text("query_text", text.trim().to_string());
        }
        if let Some(image) = &query.image {
            let length = image.bytes.len() as u64;
            let file = Part::stream_with_length(Body::from(image.bytes.clone()), length)
                .file_name(image.filename.clone());
            form = form
                .text("query_media_type", "image")
                .part("query_media_file", file);
        }

        let response: WireSearchResponse = self
            .send(self.http.post(self.url("search")).multipart(form), "Search")
            .await?;

        Ok(response
            .data
            .into_iter()
            .map(|hit| SearchResult {
                video_id: hit.video_id,
                start: hit.start,
                end: hit.end,
                score: normalize_score(hit.score),
                modality,
                confidence: hit.confidence,
                thumbnail_url: hit.thumbnail_url,
            })
            .collect())
    }

    #[instrument(skip(self, prompt))]
    async fn summarize(&self, video_id: &str, prompt: Option<&str>) -> Result<String> {
        let body = WireSummarizeRequest {
            video_id,
            kind: "summary",
            prompt,
        };
        let response: WireSummarizeResponse = self
            .send(self.http.post(self.url("summarize")).json(&body), "Summarize")
            .await?;

        response
            .summary
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                SnipError::Service("Summarize response did not contain a summary".to_string())
            })
    }

    #[instrument(skip(self, prompt))]
    async fn generate(&self, video_id: &str, prompt: &str) -> Result<String> {
        let body = WireGenerateRequest {
            video_id,
            prompt,
            stream: false,
        };
        let response: WireGenerateResponse = self
            .send(self.http.post(self.url("generate")).json(&body), "Generate")
            .await?;

        Ok(response.data.trim().to_string())
    }
}

/// Scores above 1 are reported as percentages.
fn normalize_score(score: f32) -> f32 {
    let score = if score > 1.0 { score / 100.0 } else { score };
    score.clamp(0.0, 1.0)
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|d| d.with_timezone(&Utc))
}

fn error_from_response(status: StatusCode, body: &str, action: &str) -> SnipError {
    let remote: Option<WireError> = serde_json::from_str(body).ok();
    let code = remote.as_ref().and_then(|e| e.code.clone()).unwrap_or_default();
    let message = remote
        .and_then(|e| e.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("no details").to_string()
            } else {
                body.trim().to_string()
            }
        });

    if status == StatusCode::NOT_FOUND || code.ends_with("not_found") {
        return SnipError::NotFound(message);
    }

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            SnipError::Service(format!("{} failed: authentication rejected: {}", action, message))
        }
        StatusCode::TOO_MANY_REQUESTS => {
            SnipError::Service(format!(
                "{} failed: rate limit or quota exceeded: {}",
                action, message
            ))
        }
        _ => SnipError::Service(format!("{} failed ({}): {}", action, status.as_u16(), message)),
    }
}

#[derive(Debug, Deserialize)]
struct WireError {
    code: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WirePage<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
    page_info: Option<WirePageInfo>,
}

#[derive(Debug, Deserialize)]
struct WirePageInfo {
    page: u32,
    total_page: u32,
}

#[derive(Debug, Serialize)]
struct WireCreateIndex<'a> {
    index_name: &'a str,
    engines: Vec<WireEngineRequest>,
    addons: &'a [String],
}

#[derive(Debug, Serialize)]
struct WireEngineRequest {
    engine_name: &'static str,
    engine_options: &'static [&'static str],
}

#[derive(Debug, Deserialize)]
struct WireCreated {
    #[serde(rename = "_id")]
    id: String,
}

#[derive(Debug, Deserialize)]
struct WireIndex {
    #[serde(rename = "_id")]
    id: String,
    index_name: String,
    #[serde(default)]
    engines: Vec<WireEngine>,
    created_at: Option<String>,
    video_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct WireEngine {
    engine_name: String,
}

impl WireIndex {
    fn into_index(self) -> Index {
        let engines = self
            .engines
            .iter()
            .filter_map(|e| match e.engine_name.parse::<Engine>() {
                Ok(engine) => Some(engine),
                Err(_) => {
                    warn!(
                        index = %self.id,
                        engine = %e.engine_name,
                        "Skipping unrecognized engine"
                    );
                    None
                }
            })
            .collect();

        Index {
            created_at: parse_timestamp(self.created_at.as_deref()),
            id: self.id,
            name: self.index_name,
            engines,
            video_count: self.video_count,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct WireVideoMetadata {
    filename: Option<String>,
    duration: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WireVideo {
    #[serde(rename = "_id")]
    id: String,
    metadata: Option<WireVideoMetadata>,
    system_metadata: Option<WireVideoMetadata>,
}

impl WireVideo {
    fn into_video(self, index_id: &str) -> Video {
        let metadata = self.metadata.unwrap_or_default();
        let system = self.system_metadata.unwrap_or_default();
        Video {
            filename: metadata
                .filename
                .or(system.filename)
                .unwrap_or_else(|| self.id.clone()),
            duration: metadata.duration.or(system.duration),
            id: self.id,
            index_id: index_id.to_string(),
            status: VideoStatus::Ready,
            language: None,
            task_id: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireCreatedTask {
    #[serde(rename = "_id")]
    id: String,
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireTask {
    #[serde(rename = "_id")]
    id: String,
    index_id: String,
    video_id: Option<String>,
    status: String,
    metadata: Option<WireVideoMetadata>,
}

impl WireTask {
    fn into_task(self) -> UploadTask {
        let metadata = self.metadata.unwrap_or_default();
        UploadTask {
            filename: metadata.filename.unwrap_or_else(|| self.id.clone()),
            duration: metadata.duration,
            status: VideoStatus::from_remote(&self.status),
            id: self.id,
            index_id: self.index_id,
            video_id: self.video_id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireSearchResponse {
    #[serde(default)]
    data: Vec<WireSearchHit>,
}

#[derive(Debug, Deserialize)]
struct WireSearchHit {
    video_id: String,
    score: f32,
    start: f64,
    end: f64,
    confidence: Option<String>,
    thumbnail_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct WireSummarizeRequest<'a> {
    video_id: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    prompt: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct WireSummarizeResponse {
    summary: Option<String>,
}

#[derive(Debug, Serialize)]
struct WireGenerateRequest<'a> {
    video_id: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct WireGenerateResponse {
    data: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use mockito::Matcher;

    fn service_for(server: &mockito::ServerGuard) -> TwelveLabsService {
        let settings = ApiSettings {
            base_url: server.url(),
            page_limit: 2,
            ..ApiSettings::default()
        };
        TwelveLabsService::new(ApiKey::parse("tlk_test").unwrap(), &settings).unwrap()
    }

    #[test]
    fn test_normalize_score() {
        assert_eq!(normalize_score(0.42), 0.42);
        assert!((normalize_score(87.5) - 0.875).abs() < 1e-6);
        assert_eq!(normalize_score(250.0), 1.0);
        assert_eq!(normalize_score(-1.0), 0.0);
    }

    #[test]
    fn test_error_mapping() {
        let err = error_from_response(
            StatusCode::BAD_REQUEST,
            r#"{"code":"index_not_found","message":"Index abc does not exist"}"#,
            "List videos",
        );
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("Index abc does not exist"));

        let err = error_from_response(StatusCode::UNAUTHORIZED, "", "List indexes");
        assert_eq!(err.kind(), ErrorKind::Service);
        assert!(err.to_string().contains("authentication"));

        let err = error_from_response(StatusCode::BAD_GATEWAY, "upstream down", "Search");
        assert!(err.to_string().contains("502"));
        assert!(err.to_string().contains("upstream down"));
    }

    #[tokio::test]
    async fn test_create_index_sends_key_and_engines() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1.2/indexes")
            .match_header("x-api-key", "tlk_test")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "index_name": "Demo",
                "engines": [{"engine_name": "marengo2.6", "engine_options": ["visual", "audio"]}],
                "addons": ["thumbnail"]
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"_id":"idx-1"}"#)
            .create_async()
            .await;

        let service = service_for(&server);
        let index = service
            .create_index(&CreateIndexRequest {
                name: "Demo".into(),
                engines: vec![Engine::Marengo26],
                addons: vec!["thumbnail".into()],
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(index.id, "idx-1");
        assert_eq!(index.name, "Demo");
        assert_eq!(index.engines, vec![Engine::Marengo26]);
        assert_eq!(index.created_at, None);
        assert_eq!(index.video_count, None);
    }

    #[tokio::test]
    async fn test_list_indexes_follows_pages() {
        let mut server = mockito::Server::new_async().await;
        let first = server
            .mock("GET", "/v1.2/indexes")
            .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
            .with_status(200)
            .with_body(
                r#"{"data":[
                    {"_id":"a","index_name":"First","engines":[{"engine_name":"marengo2.6"}],"created_at":"2024-05-01T10:00:00Z"},
                    {"_id":"b","index_name":"Second","engines":[{"engine_name":"marengo2.7"},{"engine_name":"pegasus1.1"}]}
                ],"page_info":{"page":1,"total_page":2}}"#,
            )
            .create_async()
            .await;
        let second = server
            .mock("GET", "/v1.2/indexes")
            .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
            .with_status(200)
            .with_body(r#"{"data":[{"_id":"c","index_name":"Third"}],"page_info":{"page":2,"total_page":2}}"#)
            .create_async()
            .await;

        let indexes = service_for(&server).list_indexes().await.unwrap();

        first.assert_async().await;
        second.assert_async().await;
        let ids: Vec<&str> = indexes.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(indexes[0].created_at.is_some());
        assert_eq!(indexes[1].engines, vec![Engine::Pegasus11]);
    }

    #[tokio::test]
    async fn test_list_videos_unknown_index_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1.2/indexes/missing/videos")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"code":"resource_not_exists","message":"Index missing was not found"}"#)
            .create_async()
            .await;

        let err = service_for(&server).list_videos("missing").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("Index missing was not found"));
    }

    #[tokio::test]
    async fn test_list_videos_reads_metadata() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1.2/indexes/idx/videos")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"data":[
                    {"_id":"v1","metadata":{"filename":"talk.mp4","duration":61.5}},
                    {"_id":"v2","system_metadata":{"filename":"demo.mov"}}
                ]}"#,
            )
            .create_async()
            .await;

        let videos = service_for(&server).list_videos("idx").await.unwrap();
        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].filename, "talk.mp4");
        assert_eq!(videos[0].duration, Some(61.5));
        assert_eq!(videos[1].filename, "demo.mov");
        assert_eq!(videos[1].status, VideoStatus::Ready);
    }

    #[tokio::test]
    async fn test_search_normalizes_percentage_scores() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1.2/search")
            .with_status(200)
            .with_body(
                r#"{"data":[{"video_id":"v1","score":83.2,"start":4.0,"end":9.5,"confidence":"high"}]}"#,
            )
            .create_async()
            .await;

        let options = SearchOptions {
            page_limit: 10,
            threshold: "none".into(),
            modalities: vec!["visual".into()],
        };
        let results = service_for(&server)
            .search("idx", &SearchQuery::text("a red car"), &options)
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert!((results[0].score - 0.832).abs() < 1e-4);
        assert_eq!(results[0].confidence.as_deref(), Some("high"));
    }

    #[tokio::test]
    async fn test_upload_task_streams_file_as_multipart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        std::fs::write(&path, b"fake video bytes").unwrap();

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1.2/tasks")
            .match_header("x-api-key", "tlk_test")
            .match_header("content-type", Matcher::Regex("^multipart/form-data".into()))
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="index_id"\r\n\r\nidx-1\r\n"#.into()),
                Matcher::Regex(r#"name="language"\r\n\r\nfr\r\n"#.into()),
                Matcher::Regex(
                    r#"name="video_file"; filename="clip.mp4"\r\n\r\nfake video bytes\r\n"#.into(),
                ),
            ]))
            .with_status(201)
            .with_body(r#"{"_id":"task-1","video_id":"vid-1"}"#)
            .create_async()
            .await;

        let task = service_for(&server)
            .create_upload_task(&VideoUpload {
                index_id: "idx-1".into(),
                filename: "clip.mp4".into(),
                path: path.clone(),
                size: 16,
                language: "fr".into(),
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(task.id, "task-1");
        assert_eq!(task.video_id.as_deref(), Some("vid-1"));
        assert_eq!(task.index_id, "idx-1");
        assert_eq!(task.filename, "clip.mp4");
        assert_eq!(task.status, VideoStatus::Uploading);
    }

    #[tokio::test]
    async fn test_image_search_sends_media_without_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1.2/search")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="index_id"\r\n\r\nidx\r\n"#.into()),
                Matcher::Regex(r#"name="page_limit"\r\n\r\n5\r\n"#.into()),
                // search_options is followed directly by the media fields
                Matcher::Regex(
                    concat!(
                        r#"name="search_options"\r\n\r\nvisual\r\n--[^\r]+\r\n"#,
                        r#"Content-Disposition: form-data; name="query_media_type"\r\n\r\nimage\r\n"#,
                    )
                    .into(),
                ),
                Matcher::Regex(
                    r#"name="query_media_file"; filename="frame.png"\r\n\r\nPNGDATA\r\n"#.into(),
                ),
            ]))
            .with_status(200)
            .with_body(r#"{"data":[{"video_id":"v2","score":0.61,"start":1.0,"end":3.0}]}"#)
            .create_async()
            .await;

        let options = SearchOptions {
            page_limit: 5,
            threshold: "none".into(),
            modalities: vec!["visual".into()],
        };
        let results = service_for(&server)
            .search("idx", &SearchQuery::image("frame.png", b"PNGDATA".to_vec()), &options)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].video_id, "v2");
        assert_eq!(results[0].modality, crate::models::Modality::Image);
    }

    #[tokio::test]
    async fn test_summarize_sends_summary_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1.2/summarize")
            .match_header("x-api-key", "tlk_test")
            .match_body(Matcher::Json(serde_json::json!({
                "video_id": "v1",
                "type": "summary",
                "prompt": "Be brief."
            })))
            .with_status(200)
            .with_body(r#"{"id":"s1","summary":"  A short talk about rust.  "}"#)
            .create_async()
            .await;

        let summary = service_for(&server)
            .summarize("v1", Some("Be brief."))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(summary, "A short talk about rust.");
    }

    #[tokio::test]
    async fn test_summarize_without_summary_is_service_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1.2/summarize")
            .match_body(Matcher::Json(serde_json::json!({"video_id": "v1", "type": "summary"})))
            .with_status(200)
            .with_body(r#"{"id":"s1"}"#)
            .create_async()
            .await;

        let err = service_for(&server).summarize("v1", None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Service);
        assert!(err.to_string().contains("did not contain a summary"));
    }

    #[tokio::test]
    async fn test_generate_returns_answer() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1.2/generate")
            .match_body(Matcher::Json(serde_json::json!({
                "video_id": "v1",
                "prompt": "What happens?",
                "stream": false
            })))
            .with_status(200)
            .with_body(r#"{"id":"g1","data":" A dog catches a frisbee. "}"#)
            .create_async()
            .await;

        let answer = service_for(&server).generate("v1", "What happens?").await.unwrap();

        mock.assert_async().await;
        assert_eq!(answer, "A dog catches a frisbee.");
    }

    #[tokio::test]
    async fn test_malformed_response_is_service_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1.2/generate")
            .with_status(200)
            .with_body("<html>gateway</html>")
            .create_async()
            .await;

        let err = service_for(&server).generate("v1", "What happens?").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Service);
    }

    #[tokio::test]
    async fn test_get_task_maps_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1.2/tasks/t1")
            .with_status(200)
            .with_body(
                r#"{"_id":"t1","index_id":"idx","video_id":"v9","status":"indexing","metadata":{"filename":"clip.mp4","duration":12.0}}"#,
            )
            .create_async()
            .await;

        let task = service_for(&server).get_upload_task("t1").await.unwrap();
        assert_eq!(task.status, VideoStatus::Processing);
        assert_eq!(task.video_id.as_deref(), Some("v9"));
        assert_eq!(task.filename, "clip.mp4");
    }
}
