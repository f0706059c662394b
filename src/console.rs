use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::{interval, MissedTickBehavior};

use crate::predict::{GroundStation, Satellite};
use crate::skytrack::FrameState;

/// Print a status line every `period` until `stop` resolves. Returns the
/// number of ticks that produced a frame.
pub async fn track(
    satellite: &Satellite,
    station: &GroundStation,
    period: Duration,
    clock: impl Fn() -> DateTime<Utc>,
    stop: impl Future<Output = ()>,
) -> usize {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(stop);

    log::info!(
        "Tracking {} every {}",
        satellite.name,
        humantime::format_duration(period)
    );

    let mut frames = 0;
    loop {
        let should_stop = tokio::select! {
            _ = ticker.tick() => false,
            _ = &mut stop => true,
        };
        if should_stop {
            break;
        }

        match FrameState::at(satellite, station, clock()) {
            Ok(frame) => {
                println!("{}", frame.status_line());
                frames += 1;
            }
            Err(e) => log::error!("Failed to update {}: {}", satellite.name, e),
        }
    }

    log::info!("Stopped after {} updates", frames);
    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_elements;
    use chrono::TimeZone;

    fn iss() -> Satellite {
        let catalog = concat!(
            "ISS (ZARYA)\n",
            "1 25544U 98067A   24001.50000000  .00016717  00000-0  30375-3 0  9995\n",
            "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.49815350432986\n",
        );
        Satellite::from_elements(&find_elements(catalog, "ISS (ZARYA)").unwrap()).unwrap()
    }

    fn fixed_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 14, 0, 0).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_until_stopped() {
        let sat = iss();
        let station = GroundStation::new(40.7128, -74.006, 10.0);

        let frames = track(
            &sat,
            &station,
            Duration::from_secs(5),
            fixed_clock,
            tokio::time::sleep(Duration::from_secs(12)),
        )
        .await;
        assert_eq!(frames, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_before_first_tick() {
        let sat = iss();
        let station = GroundStation::new(40.7128, -74.006, 10.0);

        let frames = track(&sat, &station, Duration::from_secs(5), fixed_clock, async {}).await;
        assert!(frames <= 1);
    }
}
