use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::core::error::LlmError;

/// Message content: a plain string or an ordered list of typed chunks.
///
/// A missing or `null` content field is modelled as `Option::<Content>::None`
/// on the owning message, which keeps it distinct from `Chunks(vec![])`.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Text(String),
    Chunks(Vec<ContentChunk>),
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text(text.into())
    }

    pub fn chunks(chunks: Vec<ContentChunk>) -> Self {
        Content::Chunks(chunks)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::Chunks(_) => None,
        }
    }

    /// The chunk list; empty for plain-string content.
    pub fn as_chunks(&self) -> &[ContentChunk] {
        match self {
            Content::Text(_) => &[],
            Content::Chunks(chunks) => chunks,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Content::Text(text) => text.is_empty(),
            Content::Chunks(chunks) => chunks.is_empty(),
        }
    }

    /// Decode a raw content field. `null` yields `Ok(None)`.
    ///
    /// Unlike the serde path this reports unknown chunk types as
    /// [`LlmError::UnrecognizedContentChunk`].
    pub fn from_value(value: &Value) -> Result<Option<Self>, LlmError> {
        match value {
            Value::Null => Ok(None),
            Value::String(text) => Ok(Some(Content::Text(text.clone()))),
            Value::Array(items) => items
                .iter()
                .map(|item| ContentChunk::from_value(item.clone()))
                .collect::<Result<Vec<_>, _>>()
                .map(|chunks| Some(Content::Chunks(chunks))),
            other => Err(LlmError::parse(
                "content must be a string or an array of chunks",
                <serde_json::Error as de::Error>::invalid_type(
                    unexpected(other),
                    &"a string or an array of chunks",
                ),
            )),
        }
    }

    /// Join all text into one newline-separated string.
    ///
    /// Fails on the first non-text chunk instead of dropping it.
    pub fn flatten_to_text(&self) -> Result<String, LlmError> {
        match self {
            Content::Text(text) => Ok(text.clone()),
            Content::Chunks(chunks) => flatten_chunks(chunks),
        }
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<Vec<ContentChunk>> for Content {
    fn from(chunks: Vec<ContentChunk>) -> Self {
        Content::Chunks(chunks)
    }
}

pub fn flatten_chunks(chunks: &[ContentChunk]) -> Result<String, LlmError> {
    let texts = chunks
        .iter()
        .map(|chunk| match chunk {
            ContentChunk::Text { text } => Ok(text.as_str()),
            other => Err(LlmError::NonTextContent(other.chunk_type().to_string())),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(texts.join("\n"))
}

impl Serialize for Content {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Content::Text(text) => serializer.serialize_str(text),
            Content::Chunks(chunks) => {
                let mut seq = serializer.serialize_seq(Some(chunks.len()))?;
                for chunk in chunks {
                    seq.serialize_element(chunk)?;
                }
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Content {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ContentVisitor;

        impl<'de> Visitor<'de> for ContentVisitor {
            type Value = Content;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string or an array of content chunks")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Content, E> {
                Ok(Content::Text(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Content, E> {
                Ok(Content::Text(v))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Content, A::Error> {
                let mut chunks = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(chunk) = seq.next_element::<ContentChunk>()? {
                    chunks.push(chunk);
                }
                Ok(Content::Chunks(chunks))
            }
        }

        deserializer.deserialize_any(ContentVisitor)
    }
}

/// One typed element of chunked content, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentChunk {
    Text {
        text: String,
    },
    ImageUrl {
        #[serde(rename = "image_url")]
        url: String,
    },
    /// URL, base64 payload or uploaded file id.
    #[serde(rename = "input_audio")]
    Audio {
        input_audio: String,
    },
    DocumentUrl {
        document_url: String,
        #[serde(skip_serializing_if = "String::is_empty")]
        document_name: String,
    },
    Reference {
        reference_ids: Vec<i64>,
    },
    File {
        file_id: String,
    },
    Thinking {
        thinking: Vec<ContentChunk>,
        closed: bool,
    },
}

#[derive(Deserialize)]
struct TextFields {
    text: String,
}

#[derive(Deserialize)]
struct ImageUrlFields {
    image_url: ImageUrlField,
}

// Accepted both as a bare URL and as `{"url": ..., "detail": ...}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ImageUrlField {
    Url(String),
    Object { url: String },
}

#[derive(Deserialize)]
struct AudioFields {
    input_audio: String,
}

#[derive(Deserialize)]
struct DocumentUrlFields {
    document_url: String,
    #[serde(default)]
    document_name: Option<String>,
}

#[derive(Deserialize)]
struct ReferenceFields {
    #[serde(default)]
    reference_ids: Vec<i64>,
}

#[derive(Deserialize)]
struct FileFields {
    file_id: String,
}

#[derive(Deserialize)]
struct ThinkingFields {
    #[serde(default)]
    thinking: Vec<Value>,
    #[serde(default = "closed_by_default")]
    closed: bool,
}

fn closed_by_default() -> bool {
    true
}

impl ContentChunk {
    pub fn text(text: impl Into<String>) -> Self {
        ContentChunk::Text { text: text.into() }
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        ContentChunk::ImageUrl { url: url.into() }
    }

    pub fn audio(input_audio: impl Into<String>) -> Self {
        ContentChunk::Audio {
            input_audio: input_audio.into(),
        }
    }

    pub fn document_url(document_name: impl Into<String>, document_url: impl Into<String>) -> Self {
        ContentChunk::DocumentUrl {
            document_url: document_url.into(),
            document_name: document_name.into(),
        }
    }

    pub fn reference(reference_ids: Vec<i64>) -> Self {
        ContentChunk::Reference { reference_ids }
    }

    pub fn file(file_id: impl Into<String>) -> Self {
        ContentChunk::File {
            file_id: file_id.into(),
        }
    }

    /// A closed thinking block.
    pub fn thinking(thinking: Vec<ContentChunk>) -> Self {
        ContentChunk::Thinking {
            thinking,
            closed: true,
        }
    }

    /// Wire discriminator of this chunk.
    pub fn chunk_type(&self) -> &'static str {
        match self {
            ContentChunk::Text { .. } => "text",
            ContentChunk::ImageUrl { .. } => "image_url",
            ContentChunk::Audio { .. } => "input_audio",
            ContentChunk::DocumentUrl { .. } => "document_url",
            ContentChunk::Reference { .. } => "reference",
            ContentChunk::File { .. } => "file",
            ContentChunk::Thinking { .. } => "thinking",
        }
    }

    pub fn from_value(value: Value) -> Result<Self, LlmError> {
        let chunk_type = match value.get("type") {
            Some(Value::String(chunk_type)) => chunk_type.clone(),
            Some(other) => return Err(LlmError::UnrecognizedContentChunk(other.to_string())),
            None => return Err(LlmError::UnrecognizedContentChunk("<missing>".to_string())),
        };

        let chunk = match chunk_type.as_str() {
            "text" => {
                let fields: TextFields = decode_fields(&chunk_type, value)?;
                ContentChunk::Text { text: fields.text }
            }
            "image_url" => {
                let fields: ImageUrlFields = decode_fields(&chunk_type, value)?;
                let url = match fields.image_url {
                    ImageUrlField::Url(url) | ImageUrlField::Object { url } => url,
                };
                ContentChunk::ImageUrl { url }
            }
            "input_audio" => {
                let fields: AudioFields = decode_fields(&chunk_type, value)?;
                ContentChunk::Audio {
                    input_audio: fields.input_audio,
                }
            }
            "document_url" => {
                let fields: DocumentUrlFields = decode_fields(&chunk_type, value)?;
                ContentChunk::DocumentUrl {
                    document_url: fields.document_url,
                    document_name: fields.document_name.unwrap_or_default(),
                }
            }
            "reference" => {
                let fields: ReferenceFields = decode_fields(&chunk_type, value)?;
                ContentChunk::Reference {
                    reference_ids: fields.reference_ids,
                }
            }
            "file" => {
                let fields: FileFields = decode_fields(&chunk_type, value)?;
                ContentChunk::File {
                    file_id: fields.file_id,
                }
            }
            "thinking" => {
                let fields: ThinkingFields = decode_fields(&chunk_type, value)?;
                let thinking = fields
                    .thinking
                    .into_iter()
                    .map(ContentChunk::from_value)
                    .collect::<Result<Vec<_>, _>>()?;
                ContentChunk::Thinking {
                    thinking,
                    closed: fields.closed,
                }
            }
            _ => return Err(LlmError::UnrecognizedContentChunk(chunk_type)),
        };

        Ok(chunk)
    }
}

fn decode_fields<T: for<'de> Deserialize<'de>>(chunk_type: &str, value: Value) -> Result<T, LlmError> {
    serde_json::from_value(value)
        .map_err(|e| LlmError::parse(format!("invalid '{chunk_type}' content chunk"), e))
}

impl<'de> Deserialize<'de> for ContentChunk {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ContentChunk::from_value(value).map_err(de::Error::custom)
    }
}

fn unexpected(value: &Value) -> de::Unexpected<'_> {
    match value {
        Value::Bool(b) => de::Unexpected::Bool(*b),
        Value::Number(_) => de::Unexpected::Other("number"),
        Value::Object(_) => de::Unexpected::Map,
        Value::Null => de::Unexpected::Unit,
        Value::String(s) => de::Unexpected::Str(s),
        Value::Array(_) => de::Unexpected::Seq,
    }
}
