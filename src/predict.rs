// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::{fmt, time::Duration};

use log::{debug, info};

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use crate::errors::ProteinScapeError;

pub const ESMFOLD_URL: &str = "https://api.esmatlas.com/foldSequence/v1/pdb/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Raw structure file (PDB) as returned by the prediction service. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureText(String);

impl StructureText {
    pub fn new(text: String) -> Self {
        StructureText(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Number of ATOM / HETATM records.
    pub fn atom_count(&self) -> usize {
        self.0
            .lines()
            .filter(|l| l.starts_with("ATOM") || l.starts_with("HETATM"))
            .count()
    }
}

impl fmt::Display for StructureText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Anything that turns a sequence into a structure.
pub trait StructurePredictor {
    fn predict(&self, sequence: &str) -> Result<StructureText, ProteinScapeError>;
}

/// Client for the ESMFold API. One attempt per call, bounded by the client's timeout.
pub struct EsmFoldClient {
    client: Client,
    endpoint: String,
}

impl EsmFoldClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ProteinScapeError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(EsmFoldClient {
            client,
            endpoint: String::from(endpoint),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl StructurePredictor for EsmFoldClient {
    fn predict(&self, sequence: &str) -> Result<StructureText, ProteinScapeError> {
        info!(
            "POST {} ({} residues)",
            self.endpoint,
            sequence.chars().count()
        );
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(sequence.to_owned())
            .send()?
            .error_for_status()?;
        let bytes = response.bytes()?;
        debug!("received {} bytes", bytes.len());
        let text = String::from_utf8(bytes.to_vec()).map_err(|e| {
            ProteinScapeError::PredictionRequest(format!("response is not UTF-8: {}", e))
        })?;
        Ok(StructureText::new(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    // Answers one request with `status` and `body`; the join handle yields the raw request.
    fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let url = format!("http://{}/fold", listener.local_addr().expect("addr"));
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = stream.read(&mut chunk).expect("read");
                request.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&request).to_lowercase();
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text[..end]
                        .lines()
                        .find_map(|l| l.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if request.len() >= end + 4 + length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).expect("write");
            String::from_utf8_lossy(&request).into_owned()
        });
        (url, handle)
    }

    const PDB: &str = "\
HEADER    TEST
ATOM      1  N   MET A   1      11.104   6.134  -6.504  1.00  0.00           N
ATOM      2  CA  MET A   1      11.639   6.071  -5.147  1.00  0.00           C
HETATM    3  O   HOH A   2       1.000   1.000   1.000  1.00  0.00           O
END
";

    #[test]
    fn test_atom_count() {
        let s = StructureText::new(String::from(PDB));
        assert_eq!(s.atom_count(), 3);
        assert_eq!(StructureText::new(String::new()).atom_count(), 0);
    }

    #[test]
    fn test_structure_text_verbatim() {
        let s = StructureText::new(String::from(PDB));
        assert_eq!(s.to_string(), PDB);
        assert_eq!(s.into_string(), PDB);
    }

    #[test]
    fn test_predict_posts_raw_sequence() {
        let (url, server) = serve_once("200 OK", "ATOM 1\nEND\n");
        let client = EsmFoldClient::new(&url, Duration::from_secs(5)).expect("client");
        let res = client.predict("MKT").expect("prediction");
        assert_eq!(res.as_str(), "ATOM 1\nEND\n");

        let request = server.join().expect("server");
        assert!(request.starts_with("POST /fold "));
        assert!(request
            .to_lowercase()
            .contains("content-type: application/x-www-form-urlencoded"));
        assert!(request.ends_with("\r\n\r\nMKT"));
    }

    #[test]
    fn test_error_status_is_prediction_error() {
        let (url, server) = serve_once("500 Internal Server Error", "oops");
        let client = EsmFoldClient::new(&url, Duration::from_secs(5)).expect("client");
        let res = client.predict("MKT");
        server.join().expect("server");
        match res {
            Err(ProteinScapeError::PredictionRequest(msg)) => assert!(msg.contains("500")),
            other => panic!("expected a prediction error, got {:?}", other),
        }
    }

    #[test]
    fn test_unreachable_endpoint_is_prediction_error() {
        // Port 9 (discard) on localhost: nothing listens there in test environments.
        let client = EsmFoldClient::new("http://127.0.0.1:9/", Duration::from_secs(2))
            .expect("client");
        let res = client.predict("MKT");
        assert!(matches!(res, Err(ProteinScapeError::PredictionRequest(_))));
    }
}
