//! Incremental parser for streamed generate responses
//!
//! The summarizer API streams newline-delimited JSON objects, and a single
//! network chunk can carry several objects or cut one in half. This parser
//! accumulates bytes and extracts every complete object with a single-pass
//! bracket-matching scan that ignores braces inside strings.

use serde::Deserialize;

use crate::errors::{Result, TriageError};

/// Maximum buffer size (1MB)
pub const MAX_BUFFER_SIZE: usize = 1_048_576;

/// One decoded object from the generate stream
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateChunk {
    /// Text fragment produced by the model
    #[serde(default)]
    pub response: String,

    /// True on the final object of the stream
    #[serde(default)]
    pub done: bool,

    /// Server-side error reported mid-stream
    #[serde(default)]
    pub error: Option<String>,
}

/// Incremental JSON object extractor over a byte stream
#[derive(Debug)]
pub struct ChunkParser {
    /// Accumulation buffer
    buffer: Vec<u8>,

    /// Maximum buffer size
    max_buffer_size: usize,
}

impl ChunkParser {
    /// Create a parser with the default buffer limit
    pub fn new() -> Self {
        Self::with_capacity(MAX_BUFFER_SIZE)
    }

    /// Create a parser with a custom buffer limit
    pub fn with_capacity(max_buffer_size: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(4096),
            max_buffer_size,
        }
    }

    /// Add bytes and return every complete JSON object now available
    ///
    /// Objects are returned in stream order. Bytes belonging to a
    /// trailing partial object stay buffered for the next call.
    pub fn add_bytes(&mut self, bytes: &[u8]) -> Result<Vec<String>> {
        if self.buffer.len() + bytes.len() > self.max_buffer_size {
            return Err(TriageError::JsonParse(format!(
                "buffer overflow: {} bytes exceeds maximum {}",
                self.buffer.len() + bytes.len(),
                self.max_buffer_size
            )));
        }

        self.buffer.extend_from_slice(bytes);

        let mut objects = Vec::new();
        while let Some(json) = self.try_extract_object()? {
            objects.push(json);
        }

        Ok(objects)
    }

    /// Decode one extracted object
    pub fn parse_chunk(json_str: &str) -> Result<GenerateChunk> {
        serde_json::from_str(json_str)
            .map_err(|e| TriageError::JsonParse(format!("bad stream chunk: {}", e)))
    }

    /// Pop the first complete JSON object off the buffer, if any
    fn try_extract_object(&mut self) -> Result<Option<String>> {
        if self.buffer.is_empty() {
            return Ok(None);
        }

        if let Some((start, end)) = self.find_complete_object()? {
            let json_str = String::from_utf8_lossy(&self.buffer[start..=end]).to_string();
            self.buffer.drain(..=end);
            return Ok(Some(json_str));
        }

        Ok(None)
    }

    /// Locate the first balanced `{...}` span outside of string literals
    ///
    /// Single pass over the buffer: tracks brace depth, string boundaries,
    /// and backslash escapes so braces inside string values never count.
    fn find_complete_object(&self) -> Result<Option<(usize, usize)>> {
        let mut depth = 0;
        let mut start: Option<usize> = None;
        let mut in_string = false;
        let mut escape_next = false;

        for (i, &byte) in self.buffer.iter().enumerate() {
            let ch = byte as char;

            if escape_next {
                escape_next = false;
                continue;
            }

            if ch == '\\' && in_string {
                escape_next = true;
                continue;
            }

            if ch == '"' {
                in_string = !in_string;
                continue;
            }

            if in_string {
                continue;
            }

            match ch {
                '{' => {
                    if depth == 0 {
                        start = Some(i);
                    }
                    depth += 1;
                }
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        if let Some(s) = start {
                            return Ok(Some((s, i)));
                        }
                    }
                    if depth < 0 {
                        return Err(TriageError::JsonParse(
                            "mismatched braces: too many closing braces".to_string(),
                        ));
                    }
                }
                _ => {}
            }
        }

        Ok(None)
    }

    /// Bytes currently buffered
    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    /// True when no bytes are buffered
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Default for ChunkParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_object_extraction() {
        let mut parser = ChunkParser::new();

        let json = r#"{"response": "Stay", "done": false}"#;
        let objects = parser.add_bytes(json.as_bytes()).unwrap();

        assert_eq!(objects, vec![json.to_string()]);
        assert!(parser.is_empty());
    }

    #[test]
    fn test_object_split_across_chunks() {
        let mut parser = ChunkParser::new();

        assert!(parser.add_bytes(br#"{"response":"#).unwrap().is_empty());
        assert!(parser.add_bytes(br#" " hydra"#).unwrap().is_empty());

        let objects = parser.add_bytes(br#"ted", "done": false}"#).unwrap();
        assert_eq!(objects.len(), 1);

        let chunk = ChunkParser::parse_chunk(&objects[0]).unwrap();
        assert_eq!(chunk.response, " hydrated");
        assert!(!chunk.done);
    }

    #[test]
    fn test_multiple_objects_in_one_chunk() {
        let mut parser = ChunkParser::new();

        let data = "{\"response\": \"a\", \"done\": false}\n{\"response\": \"b\", \"done\": true}\n";
        let objects = parser.add_bytes(data.as_bytes()).unwrap();

        assert_eq!(objects.len(), 2);
        assert!(ChunkParser::parse_chunk(&objects[1]).unwrap().done);
    }

    #[test]
    fn test_braces_inside_response_text() {
        let mut parser = ChunkParser::new();

        let json = r#"{"response": "use {braces} carefully", "done": false}"#;
        let objects = parser.add_bytes(json.as_bytes()).unwrap();

        assert_eq!(objects, vec![json.to_string()]);
    }

    #[test]
    fn test_escaped_quotes_inside_response() {
        let mut parser = ChunkParser::new();

        let json = r#"{"response": "he said \"rest\"", "done": false}"#;
        let objects = parser.add_bytes(json.as_bytes()).unwrap();

        assert_eq!(objects.len(), 1);
        let chunk = ChunkParser::parse_chunk(&objects[0]).unwrap();
        assert_eq!(chunk.response, "he said \"rest\"");
    }

    #[test]
    fn test_error_chunk_decodes() {
        let chunk = ChunkParser::parse_chunk(r#"{"error": "model not found"}"#).unwrap();
        assert_eq!(chunk.error.as_deref(), Some("model not found"));
        assert_eq!(chunk.response, "");
    }

    #[test]
    fn test_buffer_overflow() {
        let mut parser = ChunkParser::with_capacity(100);

        let large_data = vec![b'a'; 150];
        let result = parser.add_bytes(&large_data);

        assert!(matches!(result, Err(TriageError::JsonParse(_))));
    }

    #[test]
    fn test_mismatched_closing_brace() {
        let mut parser = ChunkParser::new();

        let result = parser.add_bytes(b"}");
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_bytes_stay_buffered() {
        let mut parser = ChunkParser::new();

        parser.add_bytes(br#"{"response": "cut"#).unwrap();
        assert!(!parser.is_empty());
        assert_eq!(parser.buffer_size(), 17);
    }
}
