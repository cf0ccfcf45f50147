use std::future::Future;
use std::time::{Duration, Instant};

/// Run `fut` to completion and report the wall-clock time it took.
pub async fn timed<F>(fut: F) -> (F::Output, Duration)
where
    F: Future,
{
    let start = Instant::now();
    let output = fut.await;
    (output, start.elapsed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn measures_artificial_delay() {
        let (value, elapsed) = timed(async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            42
        })
        .await;

        assert_eq!(value, 42);
        assert!(elapsed >= Duration::from_millis(100));
        assert!(elapsed.as_secs_f64().is_finite());
    }
}
