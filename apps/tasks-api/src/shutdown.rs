//! # グレースフルシャットダウン
//!
//! Ctrl+C（SIGINT）または SIGTERM を受け取るまで待機する。
//! シグナルハンドラの登録に失敗した場合はエラーを記録し、
//! そのシグナルでは停止しない（もう一方のシグナルは引き続き待機する）。

use std::{future::Future, io};

/// シャットダウンシグナルを受け取るまで待機する
///
/// `axum::serve(..).with_graceful_shutdown(...)` に渡す。
pub async fn signal() {
    wait_for_either(ctrl_c(), terminate()).await;
}

async fn ctrl_c() -> io::Result<()> {
    tokio::signal::ctrl_c().await
}

#[cfg(unix)]
async fn terminate() -> io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    signal(SignalKind::terminate())?.recv().await;
    Ok(())
}

#[cfg(not(unix))]
async fn terminate() -> io::Result<()> {
    std::future::pending().await
}

/// どちらかのシグナルが届くまで待機する
async fn wait_for_either(
    ctrl_c: impl Future<Output = io::Result<()>>,
    terminate: impl Future<Output = io::Result<()>>,
) {
    tokio::select! {
        () = wait_for("SIGINT", ctrl_c) => {}
        () = wait_for("SIGTERM", terminate) => {}
    }
}

/// シグナルを待機する。登録に失敗した場合は完了しない
async fn wait_for(name: &'static str, signal: impl Future<Output = io::Result<()>>) {
    match signal.await {
        Ok(()) => tracing::info!(signal = name, "シャットダウンシグナルを受信しました"),
        Err(e) => {
            tracing::error!(signal = name, error = %e, "シグナルハンドラの登録に失敗しました");
            std::future::pending::<()>().await;
        }
    }
}
