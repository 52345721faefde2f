#![no_main]
use libfuzzer_sys::fuzz_target;
use selene::smard::types::{RawSeries, SeriesIndex, ms_to_local, same_day};

fuzz_target!(|data: &[u8]| {
    let tz = chrono_tz::Europe::Berlin;

    // Index payload: every decoded timestamp must convert or be rejected cleanly
    if let Ok(index) = serde_json::from_slice::<SeriesIndex>(data) {
        for ts in index.timestamps {
            let _ = ms_to_local(ts, tz);
        }
    }

    // Series payload: exercise conversion and day comparison on decoded pairs
    if let Ok(raw) = serde_json::from_slice::<RawSeries>(data) {
        let mut anchor = None;
        for (ts, _price) in raw.series {
            if let Some(dt) = ms_to_local(ts, tz) {
                let a = *anchor.get_or_insert(dt);
                let _ = same_day(dt, a);
            }
        }
    }
});
