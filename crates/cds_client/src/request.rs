use serde::Serialize;

/// The `inputs` of a retrieve submission.
///
/// All selection fields are lists of strings, the way the CDS forms submit them
/// (for example `year: ["2001"]`, `time: ["00:00", "01:00", ...]`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
    pub product_type: Vec<String>,
    pub variable: Vec<String>,
    pub year: Vec<String>,
    pub month: Vec<String>,
    pub day: Vec<String>,
    pub time: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<Area>,
    pub data_format: String,

    /// `unarchived` asks for the bare file rather than a zip.
    pub download_format: String,
}

impl Default for Request {
    fn default() -> Self {
        Self {
            product_type: vec![],
            variable: vec![],
            year: vec![],
            month: vec![],
            day: vec![],
            time: vec![],
            area: None,
            data_format: "netcdf".to_string(),
            download_format: "unarchived".to_string(),
        }
    }
}

/// `[north, west, south, east]` in degrees. Serialized as a bare JSON array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Area(pub [f64; 4]);

/// The JSON body of `POST .../processes/{dataset}/execution`.
#[derive(Serialize)]
pub(crate) struct Execution<'a> {
    pub(crate) inputs: &'a Request,
}
