pub mod downloader;
pub mod error;
pub mod factory;
pub mod filter;
pub mod host;
pub mod http;
pub mod installer;
pub mod io;
pub mod package;
pub mod subpackage;
pub mod types;

pub use error::{BallastError, Result};
pub use factory::{DownloadsFactory, SubpackageFactory};
pub use host::{Host, HostBuilder, InstallationManager};
pub use http::{HttpClient, HttpClientConfig};
pub use installer::{DownloadInstaller, PackageInstaller, SubpackageInstaller};
pub use io::{ConsoleOutput, NullOutput, OutputSink, Verbosity};
pub use package::{HostPackage, PackageMetadata};
pub use subpackage::{DownloadSource, Subpackage};
pub use types::{classify, SubpackageType};
