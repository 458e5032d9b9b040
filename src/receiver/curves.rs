// src/receiver/curves.rs

//! Grouping of data packages into curves. Requires the `alloc` feature.
//!
//! A script emits one data package per point; a measurement loop, scan or
//! generic loop end (`*`, `-`, `+`) closes the current curve.

use crate::common::{
    response::{Package, SubValue},
    timing::DEFAULT_MAX_SUB_VALUES,
    types::VarType,
};
use alloc::vec::Vec;
use log::{debug, warn};

/// The data packages of one curve, with the variable types of its columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Curve<const N: usize = DEFAULT_MAX_SUB_VALUES> {
    columns: Vec<VarType>,
    packages: Vec<Package<N>>,
}

impl<const N: usize> Curve<N> {
    /// Variable types of the first package, in field order.
    pub fn columns(&self) -> &[VarType] {
        &self.columns
    }

    pub fn packages(&self) -> &[Package<N>] {
        &self.packages
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Values of one variable type, one per point that has it.
    pub fn values(&self, variable_type: VarType) -> impl Iterator<Item = f64> + '_ {
        self.sub_values(variable_type).map(|sub_value| sub_value.value)
    }

    /// Sub-values of one variable type, one per point that has it.
    pub fn sub_values(&self, variable_type: VarType) -> impl Iterator<Item = &SubValue> + '_ {
        self.packages.iter().filter_map(move |package| package.find(variable_type))
    }

    fn push(&mut self, package: Package<N>) {
        if self.packages.is_empty() {
            self.columns = package.variable_types().collect();
        } else if !package.variable_types().eq(self.columns.iter().copied()) {
            warn!("Data package layout differs from the first package of the curve");
        }
        self.packages.push(package);
    }
}

/// Builds curves from a stream of data packages and end-of-curve lines.
#[derive(Debug, Clone, Default)]
pub struct CurveCollector<const N: usize = DEFAULT_MAX_SUB_VALUES> {
    curves: Vec<Curve<N>>,
    current: Curve<N>,
}

impl<const N: usize> CurveCollector<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a point to the current curve.
    pub fn push(&mut self, package: Package<N>) {
        self.current.push(package);
    }

    /// Closes the current curve. Does nothing if it has no points, so
    /// nested loop ends do not produce empty curves.
    pub fn end_curve(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let curve = core::mem::take(&mut self.current);
        debug!("Curve {} complete with {} points", self.curves.len() + 1, curve.len());
        self.curves.push(curve);
    }

    /// Completed curves so far.
    pub fn curves(&self) -> &[Curve<N>] {
        &self.curves
    }

    /// Closes the current curve and returns all curves.
    pub fn finish(mut self) -> Vec<Curve<N>> {
        self.end_curve();
        self.curves
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::response::parse_package;

    fn package(line: &str) -> Package {
        parse_package(line)
    }

    #[test]
    fn test_curves_split_on_end_lines() {
        let mut collector = CurveCollector::new();
        collector.push(package("Pda8000001 ;ba8000002 \n"));
        collector.push(package("Pda8000003 ;ba8000004 \n"));
        collector.end_curve();
        // Nested loop end right after: no empty curve
        collector.end_curve();
        collector.push(package("Pda8000005 ;ba8000006 \n"));
        assert_eq!(collector.curves().len(), 1);

        let curves = collector.finish();
        assert_eq!(curves.len(), 2);
        assert_eq!(curves[0].len(), 2);
        assert_eq!(curves[1].len(), 1);
        assert_eq!(curves[1].columns(), &[VarType::CELL_SET_POTENTIAL, VarType::CURRENT]);
    }

    #[test]
    fn test_curve_values() {
        let mut collector = CurveCollector::new();
        collector.push(package("Pda8000001 ;ba8000002 \n"));
        collector.push(package("Pda8000003 \n"));
        collector.push(package("Pda8000005 ;ba8000006 \n"));
        let curves = collector.finish();
        let potentials: Vec<f64> = curves[0].values(VarType::CELL_SET_POTENTIAL).collect();
        assert_eq!(potentials, vec![1.0, 3.0, 5.0]);
        let currents: Vec<f64> = curves[0].values(VarType::CURRENT).collect();
        assert_eq!(currents, vec![2.0, 6.0]);
        assert_eq!(curves[0].packages().len(), 3);
    }

    #[test]
    fn test_empty_collector() {
        let collector: CurveCollector = CurveCollector::new();
        assert!(collector.finish().is_empty());
    }
}
