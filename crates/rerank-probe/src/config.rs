use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::RerankError;
use crate::types::RerankRequest;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8182";
pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEMO_QUERY: &str = "机器学习算法的基本原理";
pub const DEMO_DOCUMENTS: [&str; 5] = [
    "机器学习是人工智能的一个分支，通过算法让计算机自动从数据中学习模式。",
    "深度学习使用神经网络来模拟人脑的学习过程。",
    "监督学习需要标注的训练数据来训练模型。",
    "今天天气很好，适合户外运动。",
    "线性回归是最简单的机器学习算法之一。",
];

#[derive(Debug, Clone)]
pub struct RerankServiceConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl RerankServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Everything one probe run needs: where to send it and what to send.
///
/// The default is the demonstration payload (one query, five candidate
/// documents, `top_n = 10`) against [`DEFAULT_BASE_URL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    pub base_url: String,
    pub query: String,
    pub documents: Vec<String>,
    pub top_n: usize,
    pub timeout: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ProbeConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            query: DEMO_QUERY.to_string(),
            documents: DEMO_DOCUMENTS.iter().map(ToString::to_string).collect(),
            top_n: DEFAULT_TOP_N,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Parses a JSON config document. Absent fields keep their demo defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, RerankError> {
        let file: ProbeConfigFile = serde_json::from_str(raw)
            .map_err(|e| RerankError::Config(format!("invalid probe config: {e}")))?;
        let mut config = Self::default();
        if let Some(base_url) = file.base_url {
            config.base_url = base_url;
        }
        if let Some(query) = file.query {
            config.query = query;
        }
        if let Some(documents) = file.documents {
            config.documents = documents;
        }
        if let Some(top_n) = file.top_n {
            config.top_n = top_n;
        }
        match file.timeout_secs {
            Some(0) => {
                return Err(RerankError::Config(
                    "timeout_secs must be greater than zero".to_string(),
                ));
            }
            Some(secs) => config.timeout = Duration::from_secs(secs),
            None => {}
        }
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RerankError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            RerankError::Config(format!("cannot read probe config {}: {e}", path.display()))
        })?;
        Self::from_json_str(&raw)
    }

    pub fn request(&self) -> RerankRequest {
        RerankRequest {
            query: self.query.clone(),
            documents: self.documents.clone(),
            top_n: self.top_n,
        }
    }

    pub fn service(&self) -> RerankServiceConfig {
        RerankServiceConfig {
            base_url: self.base_url.clone(),
            timeout: self.timeout,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProbeConfigFile {
    base_url: Option<String>,
    query: Option<String>,
    documents: Option<Vec<String>>,
    top_n: Option<usize>,
    timeout_secs: Option<u64>,
}
