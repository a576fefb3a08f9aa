use std::time::Duration;

/// Where the todo collection lives when nothing else is configured
pub const DEFAULT_ENDPOINT: &str = "https://todo-app-server-mern.onrender.com";

/// How long a success/error notice stays on screen
pub const NOTICE_DURATION_MS: u64 = 2000;

pub const LOG_FILE_PATH: &str = "/tmp/tasklist.log";

pub const FRAME_DURATION: Duration = Duration::from_millis(1000 / 30); // 30 FPS

/// Max time to wait for in-flight requests when quitting
pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(15);
