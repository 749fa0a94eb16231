mod local_upload_store;
mod ytdlp_downloader;

pub use local_upload_store::LocalUploadStore;
pub use ytdlp_downloader::YtDlpDownloader;
