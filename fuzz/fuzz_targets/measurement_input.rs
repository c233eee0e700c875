#![no_main]

use gcpause::control_chart::ControlChartBuilder;
use gcpause::distribution::summarize;
use gcpause::gc_log::{parse_measurements, PauseExtractor};
use gcpause::series::MeasurementSeries;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // GC log scanning never fails on in-memory input, whatever the bytes
    assert!(PauseExtractor::parallel_time().extract_all(data).is_ok());
    assert!(PauseExtractor::times_real().extract_all(data).is_ok());

    // Any parsed series either fails cleanly or yields a finite chart
    let Ok(values) = parse_measurements(data) else {
        return;
    };
    if let Ok(summary) = summarize(&values) {
        assert!(summary.fits.windows(2).all(|w| w[0].p_value >= w[1].p_value));
    }
    let Ok(series) = MeasurementSeries::new(values) else {
        return;
    };
    let Ok(builder) = ControlChartBuilder::new(series) else {
        return;
    };
    if let Ok(analysis) = builder.analyze() {
        assert!(analysis.parameters.lower_control_limit >= 0.0);
        assert!((0.0..=1.0).contains(&analysis.out_of_control_ratio));
    }
});
