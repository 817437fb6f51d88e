// Sensor catalog - the fixed mapping from storage tables to display settings

#[derive(Debug, Clone, PartialEq)]
pub struct SensorTable {
    /// Short id used by the download and refresh forms ("1".."4")
    pub id: &'static str,
    /// Physical table name in the store; may contain '/'
    pub table: &'static str,
    pub title: &'static str,
    pub y_axis_title: &'static str,
    pub color: &'static str,
    /// CSV download name, without extension
    pub filename: &'static str,
}

impl SensorTable {
    /// Name of the form field that requests a CSV download of this sensor
    pub fn download_field(&self) -> String {
        format!("download{}", self.id)
    }
}

const STANDARD_SENSORS: [SensorTable; 4] = [
    SensorTable {
        id: "1",
        table: "CM_HAM_DO_AI1/Temp_value",
        title: "Temperature (Celsius)",
        y_axis_title: "Temperature (Celsius)",
        color: "#636EFA",
        filename: "temperature",
    },
    SensorTable {
        id: "2",
        table: "CM_HAM_PH_AI1/pH_value",
        title: "pH",
        y_axis_title: "pH",
        color: "#EF553B",
        filename: "ph",
    },
    SensorTable {
        id: "3",
        table: "CM_PID_DO/Process_DO",
        title: "Distilled Oxygen (%)",
        y_axis_title: "Distilled Oxygen (%)",
        color: "#00CC96",
        filename: "distilled_oxygen",
    },
    SensorTable {
        id: "4",
        table: "CM_PRESSURE/Output",
        title: "Pressure (psi)",
        y_axis_title: "Pressure (psi)",
        color: "#AB63FA",
        filename: "pressure",
    },
];

/// Immutable sensor catalog, built once at startup and shared by reference.
/// Every request-derived identifier is resolved through it before any query
/// is built.
#[derive(Debug, Clone)]
pub struct SensorCatalog {
    sensors: Vec<SensorTable>,
}

impl SensorCatalog {
    pub fn new(sensors: Vec<SensorTable>) -> Self {
        Self { sensors }
    }

    /// The four sensors shown on the dashboard
    pub fn standard() -> Self {
        Self::new(STANDARD_SENSORS.to_vec())
    }

    pub fn sensors(&self) -> &[SensorTable] {
        &self.sensors
    }

    pub fn by_id(&self, id: &str) -> Option<&SensorTable> {
        self.sensors.iter().find(|s| s.id == id)
    }

    /// First sensor (in catalog order) whose download field is present
    pub fn by_download_field<'a, I>(&self, fields: I) -> Option<&SensorTable>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let fields: Vec<&str> = fields.into_iter().collect();
        self.sensors
            .iter()
            .find(|s| fields.iter().any(|f| *f == s.download_field()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_id() {
        let catalog = SensorCatalog::standard();

        assert_eq!(catalog.by_id("3").unwrap().title, "Distilled Oxygen (%)");
        assert_eq!(catalog.by_id("1").unwrap().table, "CM_HAM_DO_AI1/Temp_value");
        assert!(catalog.by_id("0").is_none());
        assert!(catalog.by_id("5").is_none());
        assert!(catalog.by_id("").is_none());
    }

    #[test]
    fn test_lookup_by_download_field() {
        let catalog = SensorCatalog::standard();

        let sensor = catalog.by_download_field(["download2"]).unwrap();
        assert_eq!(sensor.filename, "ph");

        // Catalog order wins when several buttons are submitted
        let sensor = catalog.by_download_field(["download4", "download1"]).unwrap();
        assert_eq!(sensor.filename, "temperature");

        assert!(catalog.by_download_field(["download9", "id"]).is_none());
    }

    #[test]
    fn test_standard_catalog_is_consistent() {
        let catalog = SensorCatalog::standard();
        let filenames: Vec<&str> = catalog.sensors().iter().map(|s| s.filename).collect();

        assert_eq!(filenames, ["temperature", "ph", "distilled_oxygen", "pressure"]);
        for (index, sensor) in catalog.sensors().iter().enumerate() {
            assert_eq!(sensor.id, (index + 1).to_string());
        }
    }
}
