//! Group accumulation for energy reading records
//!
//! D0010 body records arrive as a flat sequence but describe a hierarchy:
//! one MPAN core (026) owns meter-level context (027/028/029) and one or
//! more register readings (030), each with its own register-level context
//! (032/033). The accumulator walks that sequence in file order and emits
//! one flattened group per register reading.

use super::records::{MeterReadingType, MpanCore, RegisterReading, SiteVisit, ValidationResult};

/// One accumulated energy reading group
///
/// A group carries the meter-level context it was accumulated under plus
/// exactly one register reading's own context. Slots an input file never
/// populated stay `None` and flatten to empty/absent values at persistence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnergyReadingGroup {
    pub mpan_core: Option<MpanCore>,
    pub mpan_site_visit: Option<SiteVisit>,
    pub meter_reading_type: Option<MeterReadingType>,
    pub meter_reading_site_visit: Option<SiteVisit>,
    pub register_reading: Option<RegisterReading>,
    pub validation_result: Option<ValidationResult>,
    pub register_site_visit: Option<SiteVisit>,
}

impl EnergyReadingGroup {
    /// True when no record has been attached yet
    pub fn is_empty(&self) -> bool {
        self.mpan_core.is_none()
            && self.mpan_site_visit.is_none()
            && self.meter_reading_type.is_none()
            && self.meter_reading_site_visit.is_none()
            && self.register_reading.is_none()
            && self.validation_result.is_none()
            && self.register_site_visit.is_none()
    }

    /// Start a sibling group for the next register under the same meter
    ///
    /// The carry/reset boundary of the register fan-out, field by field:
    /// meter-level context (MPAN core, its site visit, the reading type and
    /// its site visit) is carried forward; register-level context (the
    /// reading itself, its validation result and its site visit) starts
    /// absent.
    pub fn carry_meter_context(&self) -> Self {
        Self {
            mpan_core: self.mpan_core.clone(),
            mpan_site_visit: self.mpan_site_visit.clone(),
            meter_reading_type: self.meter_reading_type.clone(),
            meter_reading_site_visit: self.meter_reading_site_visit.clone(),
            register_reading: None,
            validation_result: None,
            register_site_visit: None,
        }
    }
}

/// Stateful accumulator turning classified records into ordered groups
///
/// Strictly order-dependent; one accumulator serves exactly one file scan.
#[derive(Debug, Default)]
pub struct GroupAccumulator {
    current: EnergyReadingGroup,
    groups: Vec<EnergyReadingGroup>,
}

impl GroupAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 026: a new MPAN core opens a fresh meter context
    ///
    /// Any in-progress group is flushed first; every slot, meter-level and
    /// register-level, resets before the new core is attached.
    pub fn start_mpan(&mut self, core: MpanCore) {
        self.flush();
        self.current.mpan_core = Some(core);
    }

    /// 027: site visit for the MPAN core (last write wins within a meter)
    pub fn attach_mpan_site_visit(&mut self, visit: SiteVisit) {
        self.current.mpan_site_visit = Some(visit);
    }

    /// 028: meter reading type
    pub fn attach_meter_reading_type(&mut self, reading_type: MeterReadingType) {
        self.current.meter_reading_type = Some(reading_type);
    }

    /// 029: site visit for the meter reading
    pub fn attach_meter_reading_site_visit(&mut self, visit: SiteVisit) {
        self.current.meter_reading_site_visit = Some(visit);
    }

    /// 030: register reading
    ///
    /// A second reading under the same meter (e.g. Day and Night registers)
    /// flushes the current group and fans out a sibling carrying only the
    /// meter-level context forward.
    pub fn attach_register_reading(&mut self, reading: RegisterReading) {
        if self.current.register_reading.is_some() {
            let sibling = self.current.carry_meter_context();
            self.flush();
            self.current = sibling;
        }
        self.current.register_reading = Some(reading);
    }

    /// 032: validation result for the current register reading
    pub fn attach_validation_result(&mut self, result: ValidationResult) {
        self.current.validation_result = Some(result);
    }

    /// 033: site visit for the current register reading
    pub fn attach_register_site_visit(&mut self, visit: SiteVisit) {
        self.current.register_site_visit = Some(visit);
    }

    /// Number of groups flushed so far
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Flush the in-progress group and return every accumulated group
    ///
    /// Called at the footer or, for truncated files, at end of input so no
    /// in-progress group is silently dropped.
    pub fn finish(mut self) -> Vec<EnergyReadingGroup> {
        self.flush();
        self.groups
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.groups.push(std::mem::take(&mut self.current));
        }
    }
}
