//! Stamp Builder: RawSignalBundle → UnsignedStamp
use locstamp_core::{
    LocstampError, PluginRef, Point, RawSignalBundle, SignalKey, Signals, TimeWindow,
    UnsignedStamp,
};

/// Lower bound on the window, covering clock skew and processing overhead
pub const MIN_WINDOW_SECS: i64 = 10;
pub const WINDOW_PADDING_SECS: i64 = 5;

/// `max(10, ceil(rtt / 1s) + 5)` seconds.
pub fn window_duration(round_trip_micros: u64) -> i64 {
    let rtt_secs = round_trip_micros.div_ceil(1_000_000) as i64;
    rtt_secs.saturating_add(WINDOW_PADDING_SECS).max(MIN_WINDOW_SECS)
}

#[derive(Debug, Clone)]
pub struct StampBuilder {
    plugin: PluginRef,
}

impl StampBuilder {
    pub fn new(plugin: PluginRef) -> Self {
        Self { plugin }
    }

    pub fn plugin(&self) -> &PluginRef {
        &self.plugin
    }

    /// Deterministic: the same bundle always yields the same canonical stamp.
    pub fn build(&self, bundle: &RawSignalBundle) -> Result<UnsignedStamp, LocstampError> {
        let evidence = bundle
            .evidence
            .as_ref()
            .ok_or_else(|| LocstampError::MissingEvidence(bundle.plugin.clone()))?;

        let prover = evidence.prover_claimed_location;
        let start = evidence.start_time;
        let window = TimeWindow::new(
            start,
            start.saturating_add(window_duration(evidence.round_trip_micros)),
        );

        let mut signals = Signals {
            challenge_id: Some(evidence.id.clone()),
            challenger: Some(evidence.challenger.clone()),
            challenger_location: Some(evidence.challenger_claimed_location),
            prover_location: Some(prover),
            success: Some(evidence.succeeded),
            round_trip_micros: Some(evidence.round_trip_micros),
            corroboration: Some(evidence.corroboration.clone()),
            uncertainty_km: Some(evidence.corroboration.uncertainty_km),
            evidence: Some(evidence.clone()),
            ..Signals::default()
        };
        for (key, value) in &bundle.claims {
            if !signals.insert_extra(key.clone(), value.clone()) {
                tracing::trace!(key = %key, "claim shadowed by a known signal");
            }
        }
        debug_assert!(SignalKey::ALL.iter().all(|key| signals.has(*key)));

        Ok(UnsignedStamp::at_point(
            self.plugin.clone(),
            Point {
                longitude: prover.longitude,
                latitude: prover.latitude,
            },
            window,
            signals,
        ))
    }
}
