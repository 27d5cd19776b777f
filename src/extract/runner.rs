use crate::extract::types::{ExtractError, PassEvent, SelectedFile};
use crate::records::Record;
use serde::Deserialize;
use std::sync::mpsc::Sender;

/// Seam between the pass loop and the network, so the loop's ordering and
/// abort behavior can be exercised without a live service.
#[allow(async_fn_in_trait)]
pub trait ExtractTransport {
    async fn extract(&self, file: &SelectedFile) -> Result<Record, ExtractError>;
}

/// Talks to the extraction endpoint: one multipart POST per document with
/// the raw bytes under the `file` field.
pub struct HttpTransport {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl ExtractTransport for HttpTransport {
    async fn extract(&self, file: &SelectedFile) -> Result<Record, ExtractError> {
        // An unreadable local file settles as a per-file error; it is not
        // the transport, so the rest of the pass still runs.
        let bytes = tokio::fs::read(&file.path)
            .await
            .map_err(|e| ExtractError::Rejected(format!("Failed to read file: {}", e)))?;

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file.name.clone())
            .mime_str(&file.media_type)
            .map_err(|e| ExtractError::Rejected(format!("Invalid media type: {}", e)))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ExtractError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<Record>()
                .await
                .map_err(|e| ExtractError::Rejected(format!("Failed to parse response: {}", e)))
        } else {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => format!("Extraction failed with status: {}", status),
            };
            Err(ExtractError::Rejected(message))
        }
    }
}

/// Runs one processing pass: strictly sequential, one upload in flight at
/// a time, so the status for file i is settled before upload i+1 begins.
/// Rejected files do not stop the pass; a transport failure aborts the
/// remainder and the untouched files stay Pending.
pub async fn run_pass<T: ExtractTransport>(
    files: &[SelectedFile],
    transport: &T,
    events: &Sender<PassEvent>,
) {
    for (index, file) in files.iter().enumerate() {
        events
            .send(PassEvent::Started { index })
            .unwrap_or_default();

        match transport.extract(file).await {
            Ok(record) => events
                .send(PassEvent::Extracted { index, record })
                .unwrap_or_default(),
            Err(ExtractError::Rejected(message)) => {
                println!("Extraction rejected for '{}': {}", file.name, message);
                events
                    .send(PassEvent::Failed { index, message })
                    .unwrap_or_default();
            }
            Err(ExtractError::Transport(message)) => {
                println!("Transport failure on '{}': {}", file.name, message);
                events
                    .send(PassEvent::Aborted { message })
                    .unwrap_or_default();
                return;
            }
        }
    }

    events.send(PassEvent::Finished).unwrap_or_default();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::path::Path;
    use std::sync::mpsc::channel;
    use std::sync::Mutex;

    struct ScriptedTransport {
        outcomes: Mutex<VecDeque<Result<Record, ExtractError>>>,
    }

    impl ScriptedTransport {
        fn new(outcomes: Vec<Result<Record, ExtractError>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
            }
        }
    }

    impl ExtractTransport for ScriptedTransport {
        async fn extract(&self, _file: &SelectedFile) -> Result<Record, ExtractError> {
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .expect("more uploads than scripted outcomes")
        }
    }

    fn file(name: &str) -> SelectedFile {
        SelectedFile::from_path(Path::new(name))
    }

    fn record(value: serde_json::Value) -> Record {
        value.as_object().unwrap().clone()
    }

    #[tokio::test]
    async fn successful_pass_settles_files_in_selection_order() {
        let files = vec![file("a.pdf"), file("b.jpg")];
        let transport = ScriptedTransport::new(vec![
            Ok(record(json!({"invoice_no": "1"}))),
            Ok(record(json!({"invoice_no": "2"}))),
        ]);
        let (sender, receiver) = channel();

        run_pass(&files, &transport, &sender).await;

        let events: Vec<PassEvent> = receiver.try_iter().collect();
        assert_eq!(
            events,
            vec![
                PassEvent::Started { index: 0 },
                PassEvent::Extracted {
                    index: 0,
                    record: record(json!({"invoice_no": "1"})),
                },
                PassEvent::Started { index: 1 },
                PassEvent::Extracted {
                    index: 1,
                    record: record(json!({"invoice_no": "2"})),
                },
                PassEvent::Finished,
            ]
        );
    }

    #[tokio::test]
    async fn rejection_settles_one_file_and_the_pass_continues() {
        let files = vec![file("a.pdf"), file("b.jpg")];
        let transport = ScriptedTransport::new(vec![
            Ok(record(json!({"invoice_no": "1"}))),
            Err(ExtractError::Rejected("unsupported".to_string())),
        ]);
        let (sender, receiver) = channel();

        run_pass(&files, &transport, &sender).await;

        let events: Vec<PassEvent> = receiver.try_iter().collect();
        assert_eq!(
            events,
            vec![
                PassEvent::Started { index: 0 },
                PassEvent::Extracted {
                    index: 0,
                    record: record(json!({"invoice_no": "1"})),
                },
                PassEvent::Started { index: 1 },
                PassEvent::Failed {
                    index: 1,
                    message: "unsupported".to_string(),
                },
                PassEvent::Finished,
            ]
        );
    }

    #[tokio::test]
    async fn transport_failure_aborts_the_remaining_files() {
        let files = vec![file("a.pdf"), file("b.jpg"), file("c.png")];
        let transport = ScriptedTransport::new(vec![
            Ok(record(json!({"invoice_no": "1"}))),
            Err(ExtractError::Transport("connection refused".to_string())),
        ]);
        let (sender, receiver) = channel();

        run_pass(&files, &transport, &sender).await;

        let events: Vec<PassEvent> = receiver.try_iter().collect();
        // c.png is never started; records extracted before the failure
        // are already on the channel and survive.
        assert_eq!(
            events,
            vec![
                PassEvent::Started { index: 0 },
                PassEvent::Extracted {
                    index: 0,
                    record: record(json!({"invoice_no": "1"})),
                },
                PassEvent::Started { index: 1 },
                PassEvent::Aborted {
                    message: "connection refused".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn empty_selection_finishes_immediately() {
        let transport = ScriptedTransport::new(vec![]);
        let (sender, receiver) = channel();

        run_pass(&[], &transport, &sender).await;

        let events: Vec<PassEvent> = receiver.try_iter().collect();
        assert_eq!(events, vec![PassEvent::Finished]);
    }
}
