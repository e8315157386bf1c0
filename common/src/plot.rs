use std::path::Path;

use eyre::{Result, eyre};
use pyo3::{
    Bound, PyAny, PyResult, Python,
    types::{PyAnyMethods, PyListMethods},
};

use crate::report::ChartData;

/// Runs `func` against the `gen_plots` entry point of a matplotlib module
/// under `plots/`.
pub fn plot_python<Func>(func: Func, plotting_file: &str) -> Result<()>
where
    Func: FnOnce(Python<'_>, Bound<'_, PyAny>) -> PyResult<()>,
{
    let result: PyResult<()> = Python::with_gil(|py| {
        let sys = py.import("sys")?;
        let path = sys.getattr("path")?;
        let path: &Bound<_> = path.downcast()?;
        path.insert(0, "plots")?;

        let module = py.import(plotting_file)?;

        func(py, module.getattr("gen_plots")?)
    });
    result?;
    Ok(())
}

/// Hands the chart matrices to the plotting collaborator, which draws the
/// four panels and writes the image at `output`.
pub fn render_performance_chart(data: &ChartData, output: &Path) -> Result<()> {
    let payload = serde_json::to_string(data)?;
    let filepath = output
        .to_str()
        .ok_or_else(|| eyre!("Invalid chart output path {output:?}"))?
        .to_owned();
    plot_python(
        move |_py, gen_plots| {
            gen_plots.call1((payload.as_str(), filepath.as_str()))?;
            Ok(())
        },
        "performance",
    )
}
