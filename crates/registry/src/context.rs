//! Static catalog of PDS context-product categories.
//!
//! The registry's context products all share one product class; what
//! distinguishes an investigation from a target or an instrument is the LID
//! prefix and the category-specific metadata fields. Each category search is
//! the same operation parameterized by this configuration, rather than a
//! copy of the operation per category.

use crate::query::Expr;

/// A searchable category of PDS context products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextCategory {
    Investigation,
    Target,
    Instrument,
    InstrumentHost,
}

impl ContextCategory {
    /// All categories, in the order they are exposed to clients.
    pub const ALL: [ContextCategory; 4] = [
        ContextCategory::Investigation,
        ContextCategory::Target,
        ContextCategory::Instrument,
        ContextCategory::InstrumentHost,
    ];

    /// LID prefix shared by every product of this category.
    pub fn urn_prefix(self) -> &'static str {
        match self {
            ContextCategory::Investigation => "urn:nasa:pds:context:investigation:",
            ContextCategory::Target => "urn:nasa:pds:context:target:",
            ContextCategory::Instrument => "urn:nasa:pds:context:instrument:",
            ContextCategory::InstrumentHost => "urn:nasa:pds:context:instrument_host:",
        }
    }

    /// PDS4 label field holding this category's type classification.
    pub fn type_field(self) -> &'static str {
        match self {
            ContextCategory::Investigation => "pds:Investigation.pds:type",
            ContextCategory::Target => "pds:Target.pds:type",
            ContextCategory::Instrument => "pds:Instrument.pds:type",
            ContextCategory::InstrumentHost => "pds:Instrument_Host.pds:type",
        }
    }

    /// Fields requested by default for this category's search results.
    pub fn default_fields(self) -> &'static [&'static str] {
        match self {
            ContextCategory::Investigation => &[
                "title",
                "lid",
                "pds:Investigation.pds:start_date",
                "pds:Investigation.pds:stop_date",
                "pds:Investigation.pds:type",
                "pds:Investigation.pds:description",
            ],
            ContextCategory::Target => &["title", "lid", "pds:Target.pds:type", "pds:Target.pds:description"],
            ContextCategory::Instrument => &["title", "lid", "pds:Instrument.pds:type", "pds:Instrument.pds:description"],
            ContextCategory::InstrumentHost => &[
                "title",
                "lid",
                "pds:Instrument_Host.pds:type",
                "pds:Instrument_Host.pds:description",
            ],
        }
    }

    /// Valid values for this category's type classification, as enumerated by
    /// the PDS4 information model. Static data, not derived from any query.
    pub fn valid_types(self) -> &'static [&'static str] {
        match self {
            ContextCategory::Investigation => INVESTIGATION_TYPES,
            ContextCategory::Target => TARGET_TYPES,
            ContextCategory::Instrument => INSTRUMENT_TYPES,
            ContextCategory::InstrumentHost => INSTRUMENT_HOST_TYPES,
        }
    }

    /// Base predicate selecting latest-versioned context products of this
    /// category: class match plus LID-prefix match.
    pub fn base_predicate(self) -> Expr {
        Expr::eq("product_class", "Product_Context").and(Expr::like("lid", format!("{}*", self.urn_prefix())))
    }

    /// Full predicate for a category search: the base predicate conjoined
    /// with optional keyword and type clauses.
    pub fn search_predicate(self, keywords: &[String], type_filter: Option<&str>) -> Expr {
        let mut predicate = self.base_predicate();
        if let Some(keyword_clause) = Expr::keywords(keywords) {
            predicate = predicate.and(keyword_clause);
        }
        if let Some(type_value) = type_filter
            && !type_value.is_empty()
        {
            predicate = predicate.and(Expr::like(self.type_field(), type_value));
        }
        predicate
    }
}

const INVESTIGATION_TYPES: &[&str] = &[
    "Field Campaign",
    "Individual Investigation",
    "Mission",
    "Observing Campaign",
    "Other Investigation",
];

const INSTRUMENT_HOST_TYPES: &[&str] = &["Earth Based", "Earth-based", "Lander", "Rover", "Spacecraft"];

const TARGET_TYPES: &[&str] = &[
    "Asteroid",
    "Calibration",
    "Comet",
    "Dust",
    "Dwarf Planet",
    "Equipment",
    "Exoplanet System",
    "Galaxy",
    "Lunar Sample",
    "Magnetic Field",
    "Meteorite",
    "Meteoroid",
    "Meteoroid Stream",
    "Nebula",
    "Planet",
    "Planetary Nebula",
    "Planetary System",
    "Plasma Cloud",
    "Plasma Stream",
    "Ring",
    "Sample",
    "Satellite",
    "Star",
    "Star Cluster",
    "Sun",
    "Terrestrial Sample",
    "Trans-Neptunian Object",
];

const INSTRUMENT_TYPES: &[&str] = &[
    "Accelerometer",
    "Alpha Particle Detector",
    "Alpha Particle X-Ray Spectrometer",
    "Altimeter",
    "Anemometer",
    "Barometer",
    "Bolometer",
    "Camera",
    "Cosmic Ray Detector",
    "Dust Detector",
    "Energetic Particle Detector",
    "Gamma Ray Detector",
    "Gas Analyzer",
    "Hygrometer",
    "Imager",
    "Imaging Spectrometer",
    "Inertial Measurement Unit",
    "Infrared Spectrometer",
    "Interferometer",
    "Laser Induced Breakdown Spectrometer",
    "Magnetometer",
    "Mass Spectrometer",
    "Neutron Detector",
    "Photometer",
    "Plasma Analyzer",
    "Plasma Wave Spectrometer",
    "Polarimeter",
    "Radar",
    "Radio Science",
    "Radiometer",
    "Reflectometer",
    "Robotic Arm",
    "Seismometer",
    "Spectrograph Imager",
    "Spectrometer",
    "Thermal Imager",
    "Thermal Probe",
    "Thermometer",
    "Ultraviolet Spectrometer",
    "Weather Station",
    "X-ray Detector",
    "X-ray Diffraction Spectrometer",
    "X-ray Fluorescence Spectrometer",
];
