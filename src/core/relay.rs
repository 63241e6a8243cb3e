//! Request orchestration
//!
//! Sequences the pipeline per inbound request: (audio only) transcode →
//! transcribe, then generate reply → clean → synthesize → park the MP3 under
//! an opaque token. The three backend calls are sequential awaits; each
//! depends on the previous step's output.
//!
//! Transient input and intermediate files are `TempArtifact` guards owned by
//! the exchange call, so they are removed when the call returns on every
//! path, including backend failure partway through.

use crate::config::Config;
use crate::core::audio::{transcode_to_wav, TranscodeOutcome};
use crate::core::llm::ChatClient;
use crate::core::store::{AudioStore, TempArtifact};
use crate::core::stt::TranscriptionClient;
use crate::core::tts::{clean_for_speech, SpeechSynthesizer};
use crate::utils::error::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// One completed chat turn
#[derive(Debug)]
pub struct ChatExchange {
    /// What the caller said (typed, or transcribed from the upload)
    pub user_text: String,
    /// The language model's reply, unmodified
    pub bot_reply: String,
    /// Download token for the synthesized reply audio
    pub audio_token: Uuid,
}

/// Orchestrator for the relay pipeline
pub struct RelayService {
    chat: ChatClient,
    transcriber: TranscriptionClient,
    synthesizer: SpeechSynthesizer,
    store: Arc<AudioStore>,
    scratch_dir: PathBuf,
}

impl RelayService {
    /// Build the service and its backend clients from configuration
    pub fn new(config: &Config, store: Arc<AudioStore>) -> Self {
        Self {
            chat: ChatClient::new(config.groq.clone()),
            transcriber: TranscriptionClient::new(config.groq.clone()),
            synthesizer: SpeechSynthesizer::new(config.tts.clone()),
            store,
            scratch_dir: config.scratch_dir(),
        }
    }

    /// Handle a typed chat turn
    pub async fn text_exchange(&self, user_text: String) -> Result<ChatExchange> {
        let bot_reply = self.chat.complete(&user_text).await?;

        let spoken = clean_for_speech(&bot_reply);
        let audio = self.synthesizer.synthesize(&spoken).await?;

        let artifact = TempArtifact::create(&self.scratch_dir, ".mp3", &audio)?;
        let audio_token = self.store.insert(artifact);

        info!(%audio_token, reply_len = bot_reply.len(), "Chat exchange complete");

        Ok(ChatExchange {
            user_text,
            bot_reply,
            audio_token,
        })
    }

    /// Handle a spoken chat turn from an uploaded recording
    pub async fn audio_exchange(&self, upload: Vec<u8>) -> Result<ChatExchange> {
        // Guards keep the upload and the transcoded waveform on disk only for
        // the duration of this call
        let _input = TempArtifact::create(&self.scratch_dir, ".upload", &upload)?;

        let (waveform, filename, _converted) = match transcode_to_wav(&upload) {
            TranscodeOutcome::Converted(wav) => {
                let guard = TempArtifact::create(&self.scratch_dir, ".wav", &wav)?;
                (wav, "audio.wav", Some(guard))
            }
            TranscodeOutcome::Fallback { reason } => {
                warn!(%reason, "Transcode failed, submitting original upload");
                (upload, "audio.mp3", None)
            }
        };

        let user_text = self.transcriber.transcribe(waveform, filename).await?;
        info!(transcript_len = user_text.len(), "Upload transcribed");

        self.text_exchange(user_text).await
    }
}
