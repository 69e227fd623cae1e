//! Python module `pcl` exposing the point records.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use pyo3::create_exception;
use pyo3::exceptions::{PyOverflowError, PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyTuple;

use pcd_types::{Channel, PointXyz, Rgb};

create_exception!(pcl, RangeError, PyValueError);

/// Reads one colour component, raising `RangeError` for anything outside 0..=255,
/// including integers too wide for i64.
fn component(args: &Bound<'_, PyTuple>, index: usize, channel: Channel) -> PyResult<u8> {
    let value = args.get_item(index)?;
    let wide = match value.extract::<i64>() {
        Ok(wide) => wide,
        Err(e) if e.is_instance_of::<PyOverflowError>(args.py()) => {
            return Err(RangeError::new_err(format!(
                "{} component {} is out of range 0..=255",
                channel, value
            )));
        }
        Err(e) => return Err(e),
    };
    u8::try_from(wide).map_err(|_| {
        RangeError::new_err(pcd_types::RangeError { channel, value: wide }.to_string())
    })
}

fn arity_error(type_name: &str, given: usize) -> PyErr {
    PyTypeError::new_err(format!(
        "{}() takes 0, 1 or 3 arguments ({} given)",
        type_name, given
    ))
}

#[pyclass(name = "PointXYZ", module = "pcl", frozen)]
#[derive(Clone)]
struct PyPointXyz {
    inner: PointXyz,
}

#[pymethods]
impl PyPointXyz {
    /// PointXYZ(), PointXYZ(other) or PointXYZ(x, y, z)
    #[new]
    #[pyo3(signature = (*args))]
    fn new(args: &Bound<'_, PyTuple>) -> PyResult<Self> {
        let inner = match args.len() {
            0 => PointXyz::default(),
            1 => args.get_item(0)?.extract::<PyPointXyz>()?.inner,
            3 => {
                let (x, y, z): (f32, f32, f32) = args.extract()?;
                PointXyz::new(x, y, z)
            }
            n => return Err(arity_error("PointXYZ", n)),
        };
        Ok(Self { inner })
    }

    #[getter]
    fn x(&self) -> f32 {
        self.inner.x
    }

    #[getter]
    fn y(&self) -> f32 {
        self.inner.y
    }

    #[getter]
    fn z(&self) -> f32 {
        self.inner.z
    }

    fn describe(&self) -> String {
        self.inner.to_string()
    }

    fn is_finite(&self) -> bool {
        self.inner.is_finite()
    }

    fn to_tuple(&self) -> (f32, f32, f32) {
        (self.inner.x, self.inner.y, self.inner.z)
    }

    fn __copy__(&self) -> Self {
        self.clone()
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.inner == other.inner
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __repr__(&self) -> String {
        format!("PointXYZ{}", self.inner)
    }
}

#[pyclass(name = "RGB", module = "pcl", frozen)]
#[derive(Clone)]
struct PyRgb {
    inner: Rgb,
}

#[pymethods]
impl PyRgb {
    /// RGB(), RGB(other) or RGB(r, g, b)
    #[new]
    #[pyo3(signature = (*args))]
    fn new(args: &Bound<'_, PyTuple>) -> PyResult<Self> {
        let inner = match args.len() {
            0 => Rgb::default(),
            1 => args.get_item(0)?.extract::<PyRgb>()?.inner,
            3 => {
                let r = component(args, 0, Channel::Red)?;
                let g = component(args, 1, Channel::Green)?;
                let b = component(args, 2, Channel::Blue)?;
                Rgb::new(r, g, b)
            }
            n => return Err(arity_error("RGB", n)),
        };
        Ok(Self { inner })
    }

    #[getter]
    fn r(&self) -> u8 {
        self.inner.r
    }

    #[getter]
    fn g(&self) -> u8 {
        self.inner.g
    }

    #[getter]
    fn b(&self) -> u8 {
        self.inner.b
    }

    fn describe(&self) -> String {
        self.inner.to_string()
    }

    fn to_packed(&self) -> u32 {
        self.inner.to_packed()
    }

    fn to_tuple(&self) -> (u8, u8, u8) {
        (self.inner.r, self.inner.g, self.inner.b)
    }

    fn __copy__(&self) -> Self {
        self.clone()
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.inner == other.inner
    }

    fn __hash__(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.inner.hash(&mut hasher);
        hasher.finish()
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __repr__(&self) -> String {
        format!("RGB{}", self.inner)
    }
}

#[pymodule]
fn pcl(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyPointXyz>()?;
    m.add_class::<PyRgb>()?;
    m.add("RangeError", m.py().get_type_bound::<RangeError>())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args<'py>(py: Python<'py>, expr: &str) -> Bound<'py, PyTuple> {
        py.eval_bound(expr, None, None)
            .unwrap()
            .downcast_into::<PyTuple>()
            .unwrap()
    }

    fn rgb_error(expr: &str) -> (bool, String) {
        Python::with_gil(|py| {
            let err = PyRgb::new(&args(py, expr)).err().unwrap();
            (err.is_instance_of::<RangeError>(py), err.value_bound(py).to_string())
        })
    }

    #[test]
    fn point_xyz_arities() {
        Python::with_gil(|py| {
            let origin = PyPointXyz::new(&args(py, "()")).unwrap();
            assert_eq!(origin.inner, PointXyz::default());

            let p = PyPointXyz::new(&args(py, "(1.0, 2.0, 3.0)")).unwrap();
            assert_eq!(p.to_tuple(), (1.0, 2.0, 3.0));
            assert_eq!(p.__str__(), "(1, 2, 3)");
            assert_eq!(p.describe(), "(1, 2, 3)");
            assert_eq!(p.__repr__(), "PointXYZ(1, 2, 3)");

            let existing = Py::new(py, p.clone()).unwrap();
            let copy = PyPointXyz::new(&PyTuple::new_bound(py, [existing])).unwrap();
            assert!(copy.__eq__(&p));

            let err = PyPointXyz::new(&args(py, "(1.0, 2.0)")).err().unwrap();
            assert!(err.is_instance_of::<PyTypeError>(py));
        });
    }

    #[test]
    fn rgb_arities() {
        Python::with_gil(|py| {
            assert_eq!(PyRgb::new(&args(py, "()")).unwrap().inner, Rgb::default());

            let c = PyRgb::new(&args(py, "(255, 128, 0)")).unwrap();
            assert_eq!(c.to_tuple(), (255, 128, 0));
            assert_eq!(c.__repr__(), "RGB(255, 128, 0)");
            assert_eq!(c.to_packed(), 0x00ff_8000);

            let existing = Py::new(py, c.clone()).unwrap();
            let copy = PyRgb::new(&PyTuple::new_bound(py, [existing])).unwrap();
            assert!(copy.__eq__(&c));
            assert_eq!(copy.__hash__(), c.__hash__());

            let err = PyRgb::new(&args(py, "(1, 2, 3, 4)")).err().unwrap();
            assert!(err.is_instance_of::<PyTypeError>(py));
        });
    }

    #[test]
    fn rgb_out_of_range() {
        assert_eq!(
            rgb_error("(256, 0, 0)"),
            (true, "red component 256 is out of range 0..=255".to_string())
        );
        assert_eq!(
            rgb_error("(0, -1, 0)"),
            (true, "green component -1 is out of range 0..=255".to_string())
        );
    }

    #[test]
    fn rgb_wider_than_i64() {
        assert_eq!(
            rgb_error("(2**64, 0, 0)"),
            (
                true,
                "red component 18446744073709551616 is out of range 0..=255".to_string()
            )
        );
        assert_eq!(
            rgb_error("(0, 0, -(2**63)-1)"),
            (
                true,
                "blue component -9223372036854775809 is out of range 0..=255".to_string()
            )
        );
    }

    #[test]
    fn first_offending_channel_wins() {
        let (is_range, message) = rgb_error("(300, 2**70, 0)");
        assert!(is_range);
        assert!(message.starts_with("red component 300"));
    }

    #[test]
    fn range_error_is_value_error() {
        Python::with_gil(|py| {
            let err = RangeError::new_err("x");
            assert!(err.is_instance_of::<PyValueError>(py));
        });
    }

    #[test]
    fn non_integer_component_is_type_error() {
        Python::with_gil(|py| {
            let err = PyRgb::new(&args(py, "(1.5, 0, 0)")).err().unwrap();
            assert!(err.is_instance_of::<PyTypeError>(py));
        });
    }
}
