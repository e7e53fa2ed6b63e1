//! Client for the Smart AI study-assistant API.
//!
//! [`StudyClient`] exposes one async method per feature (summaries, MCQs,
//! chapter questions, math solving, chat, translation, ...). Each call
//! POSTs a JSON body and decodes the reply into an [`ApiOutcome`]: either
//! the success body or the application error the server reported.
//! Transport failures are returned as [`StudyError`] instead.
//!
//! Image features take an [`ImageAsset`], which only the
//! [`imaging`] pipeline can produce.

pub mod assistant;
pub mod cancel;
pub mod config;
pub mod error;
pub mod imaging;
pub mod logger;
pub mod models;

pub use assistant::{
    Dispatcher, HttpTransport, ImageClient, StudyClient, TextClient, Transport, TransportError,
};
pub use config::{ClientConfig, ImageConfig};
pub use error::{Result, StudyError};
pub use imaging::{FileDevice, ImageAcquisition, ImageSource, MediaDevice};
pub use models::{ApiOutcome, Feature, ImageAsset, ResponseBody};
