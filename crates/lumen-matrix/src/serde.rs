use serde::ser::SerializeStruct;
use serde::Deserialize;

use crate::{DenseMatrix, Matrix};

impl serde::Serialize for Matrix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Matrix", 2)?;
        state.serialize_field("data", self.as_slice())?;
        state.serialize_field("shape", &[self.rows(), self.cols()])?;
        state.end()
    }
}

impl<'de> serde::Deserialize<'de> for Matrix {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct MatrixData {
            data: Vec<f64>,
            shape: [usize; 2],
        }

        let MatrixData { data, shape } = MatrixData::deserialize(deserializer)?;

        Matrix::new(shape[0], shape[1], data).map_err(serde::de::Error::custom)
    }
}
