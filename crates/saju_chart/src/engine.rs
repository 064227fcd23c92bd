//! The chart engine: configuration plus the solar-term table it reads.
//!
//! The built-in table (1900–2100, computed) is shared process-wide and built
//! on first use. Engines configured with a different year range or an
//! almanac override file own their table.

use std::borrow::Cow;
use std::sync::LazyLock;

use chrono::{Datelike, FixedOffset, Offset, TimeDelta, Utc};
use saju_base::{
    Advisory, MarkerCatalog, TenGodsChart, YearlyEntry, four_pillars, major_fortune,
    yearly_progression as yearly_window,
};
use saju_config::{EngineConfig, SolarTermsConfig};
use saju_time::{
    CivilMoment, DEFAULT_FIRST_YEAR, DEFAULT_LAST_YEAR, SolarTermTable, summer_time_period,
    utc_offset_from_minutes,
};
use tracing::{debug, warn};

use crate::error::ChartError;
use crate::input::BirthInput;
use crate::payload::{ChartPayload, PayloadDrift};
use crate::record::ChartRecord;

static BUILTIN_TABLE: LazyLock<SolarTermTable> =
    LazyLock::new(|| SolarTermTable::computed(DEFAULT_FIRST_YEAR..=DEFAULT_LAST_YEAR));

static DEFAULT_ENGINE: LazyLock<ChartEngine> = LazyLock::new(ChartEngine::builtin);

/// The shared computed table covering 1900–2100.
pub fn builtin_table() -> &'static SolarTermTable {
    &BUILTIN_TABLE
}

/// The engine with default configuration and the built-in table.
pub fn default_engine() -> &'static ChartEngine {
    &DEFAULT_ENGINE
}

/// Build the solar-term table a configuration asks for.
pub fn solar_term_table_for(
    config: &SolarTermsConfig,
) -> Result<Cow<'static, SolarTermTable>, ChartError> {
    let default_range =
        config.first_year == DEFAULT_FIRST_YEAR && config.last_year == DEFAULT_LAST_YEAR;
    let base: Cow<'static, SolarTermTable> = if default_range {
        Cow::Borrowed(builtin_table())
    } else {
        Cow::Owned(SolarTermTable::computed(config.first_year..=config.last_year))
    };
    match &config.file {
        Some(path) => {
            let overrides = SolarTermTable::load(path)?;
            debug!(path = %path.display(), years = overrides.years().count(), "solar-term overrides");
            Ok(Cow::Owned(base.merged(&overrides)))
        }
        None => Ok(base),
    }
}

/// Computes charts under one configuration.
#[derive(Debug, Clone)]
pub struct ChartEngine {
    config: EngineConfig,
    utc_offset: FixedOffset,
    table: Cow<'static, SolarTermTable>,
}

impl ChartEngine {
    /// Validate `config` and build (or borrow) its solar-term table.
    pub fn new(config: EngineConfig) -> Result<Self, ChartError> {
        config.validate()?;
        let table = solar_term_table_for(&config.solar_terms)?;
        Self::with_table_cow(config, table)
    }

    /// Use an explicit table instead of the configured one.
    pub fn with_table(config: EngineConfig, table: SolarTermTable) -> Result<Self, ChartError> {
        config.validate()?;
        Self::with_table_cow(config, Cow::Owned(table))
    }

    fn with_table_cow(
        config: EngineConfig,
        table: Cow<'static, SolarTermTable>,
    ) -> Result<Self, ChartError> {
        let utc_offset = utc_offset_from_minutes(config.utc_offset_minutes)?;
        Ok(Self {
            config,
            utc_offset,
            table,
        })
    }

    fn builtin() -> Self {
        let config = EngineConfig::default();
        let utc_offset = utc_offset_from_minutes(config.utc_offset_minutes).unwrap_or_else(|_| Utc.fix());
        Self {
            config,
            utc_offset,
            table: Cow::Borrowed(builtin_table()),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn table(&self) -> &SolarTermTable {
        &self.table
    }

    /// The birth as a moment on the configured civil clock.
    pub fn moment(&self, birth: &BirthInput) -> CivilMoment {
        CivilMoment::new(birth.date, birth.time, self.utc_offset)
    }

    /// Advisories for births near a month-opening solar term or inside a
    /// daylight-saving period.
    ///
    /// With a known time, the nearest month-opening term within the tolerance
    /// is reported (a tolerance of 0 turns this off). With an unknown time,
    /// every month-opening term that begins during the local birth date is.
    pub fn boundary_advisories(&self, moment: &CivilMoment) -> Vec<Advisory> {
        let mut advisories = Vec::new();
        let year = moment.year();
        let years = year - 1..=year + 1;
        match moment.time {
            Some(_) => {
                let instant = moment.instant();
                let tolerance = u64::from(self.config.boundary_tolerance_minutes);
                let nearest = match tolerance {
                    0 => None,
                    _ => self.table.nearest_boundary_event(&instant, years),
                };
                if let Some(event) = nearest {
                    let minutes = (instant - event.instant).num_minutes();
                    if minutes.unsigned_abs() <= tolerance {
                        warn!(term = %event.term, minutes, "birth near solar-term boundary");
                        advisories.push(Advisory::NearSolarTermBoundary {
                            term: event.term,
                            minutes,
                        });
                    }
                }
            }
            None => {
                let day_start = moment.instant();
                let day_end = day_start + TimeDelta::days(1);
                for event in self.table.boundary_events_between(&day_start, &day_end, years) {
                    warn!(term = %event.term, "solar-term boundary on a birth date without time");
                    advisories.push(Advisory::SolarTermOnBirthDate { term: event.term });
                }
            }
        }
        if self.config.check_summer_time {
            if let Some(period) = summer_time_period(moment.date) {
                warn!(year = period.start.year(), "birth inside daylight-saving period");
                advisories.push(Advisory::SummerTime {
                    year: period.start.year(),
                });
            }
        }
        advisories
    }

    /// Compute the full chart record for a birth.
    pub fn compute_chart(&self, birth: &BirthInput) -> ChartRecord {
        let moment = self.moment(birth);
        let mut advisories = Vec::new();

        let pillars = four_pillars(&self.table, &moment).drain_into(&mut advisories);
        let fortune = major_fortune(
            &self.table,
            &moment.instant(),
            moment.year(),
            birth.gender,
            pillars.year.stem,
            pillars.month,
        )
        .drain_into(&mut advisories);
        advisories.extend(self.boundary_advisories(&moment));

        let record = ChartRecord::new(
            *birth,
            pillars,
            TenGodsChart::from_pillars(&pillars),
            MarkerCatalog::from_pillars(&pillars),
            fortune,
            advisories,
        );
        debug!(
            date = %birth.date,
            pillars = %record.pillars,
            reliability = %record.reliability,
            "chart computed"
        );
        record
    }

    /// Recompute a stored payload from its birth input and report what changed.
    pub fn verify_payload(&self, payload: &ChartPayload) -> PayloadDrift {
        let fresh = self.compute_chart(&payload.birth).payload();
        payload.drift(&fresh)
    }
}

/// Compute a chart with the default engine.
pub fn compute_chart(birth: &BirthInput) -> ChartRecord {
    default_engine().compute_chart(birth)
}

/// Verify a payload with the default engine.
pub fn verify_payload(payload: &ChartPayload) -> PayloadDrift {
    default_engine().verify_payload(payload)
}

/// The 21-year window around `window_year`, ages counted from the birth date's year.
pub fn yearly_progression(birth_date: chrono::NaiveDate, window_year: i32) -> Vec<YearlyEntry> {
    yearly_window(birth_date.year(), window_year)
}
