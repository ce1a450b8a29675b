//! Benchmark landscapes for the walkers
//!
//! A catalog of classic optimization test functions together with the
//! metadata a run needs: bounds, supported dimensions and known global
//! minima. Functions are organized by category:
//!
//! - **Unimodal**: booth, matyas, zakharov, rosenbrock, dixon-price, three-hump camel
//! - **Multimodal**: ackley, rastrigin, schwefel, eggholder, holder table, ...
//!
//! # Example
//!
//! ```rust
//! use ndarray::Array1;
//! use walkers_landscape::*;
//!
//! let x = Array1::from_vec(vec![1.0, 3.0]);
//! assert_eq!(booth(&x), 0.0);
//!
//! let landscape = get_landscape("ackley").unwrap();
//! assert!(landscape.accepts(10));
//! ```

use ndarray::Array1;

pub mod functions;
pub use functions::*;

/// Objective signature shared by every landscape
pub type LandscapeFn = fn(&Array1<f64>) -> f64;

/// Dimensions a landscape is defined for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimensions {
    /// Only this exact dimension
    Fixed(usize),
    /// Any dimension from this minimum upwards
    AtLeast(usize),
}

impl Dimensions {
    /// Whether `dim` is supported
    pub fn accepts(&self, dim: usize) -> bool {
        match *self {
            Dimensions::Fixed(d) => dim == d,
            Dimensions::AtLeast(d) => dim >= d,
        }
    }

    /// Dimension used when the caller does not pick one
    pub fn default_dim(&self) -> usize {
        match *self {
            Dimensions::Fixed(d) => d,
            Dimensions::AtLeast(d) => d.max(2),
        }
    }
}

/// Metadata for one landscape
#[derive(Debug, Clone, Copy)]
pub struct Landscape {
    /// Lookup name
    pub name: &'static str,
    /// The objective itself
    pub function: LandscapeFn,
    /// Lower bound shared by every coordinate
    pub lower: f64,
    /// Upper bound shared by every coordinate
    pub upper: f64,
    /// Supported dimensions
    pub dimensions: Dimensions,
    /// Whether the function has more than one local minimum
    pub multimodal: bool,
    /// Known global minima (location, value) for a given dimension
    pub known_minimum: fn(usize) -> Vec<(Vec<f64>, f64)>,
}

impl Landscape {
    /// Evaluate the landscape at `x`
    pub fn evaluate(&self, x: &Array1<f64>) -> f64 {
        (self.function)(x)
    }

    pub fn accepts(&self, dim: usize) -> bool {
        self.dimensions.accepts(dim)
    }

    /// Known global minimum value in `dim` dimensions, if catalogued
    pub fn minimum_value(&self, dim: usize) -> Option<f64> {
        (self.known_minimum)(dim)
            .first()
            .map(|(_, value)| *value)
    }
}

fn at_origin(dim: usize) -> Vec<(Vec<f64>, f64)> {
    vec![(vec![0.0; dim], 0.0)]
}

fn at_ones(dim: usize) -> Vec<(Vec<f64>, f64)> {
    vec![(vec![1.0; dim], 0.0)]
}

/// Every landscape in the catalog, in alphabetical order
pub fn landscapes() -> Vec<Landscape> {
    vec![
        Landscape {
            name: "ackley",
            function: ackley,
            lower: -32.768,
            upper: 32.768,
            dimensions: Dimensions::AtLeast(1),
            multimodal: true,
            known_minimum: at_origin,
        },
        Landscape {
            name: "booth",
            function: booth,
            lower: -10.0,
            upper: 10.0,
            dimensions: Dimensions::Fixed(2),
            multimodal: false,
            known_minimum: |_| vec![(vec![1.0, 3.0], 0.0)],
        },
        Landscape {
            name: "bukin_n6",
            function: bukin_n6,
            lower: -15.0,
            upper: 3.0,
            dimensions: Dimensions::Fixed(2),
            multimodal: true,
            known_minimum: |_| vec![(vec![-10.0, 1.0], 0.0)],
        },
        Landscape {
            name: "cross_in_tray",
            function: cross_in_tray,
            lower: -10.0,
            upper: 10.0,
            dimensions: Dimensions::Fixed(2),
            multimodal: true,
            known_minimum: |_| {
                let m = 1.34941;
                vec![
                    (vec![m, m], -2.06261),
                    (vec![-m, m], -2.06261),
                    (vec![m, -m], -2.06261),
                    (vec![-m, -m], -2.06261),
                ]
            },
        },
        Landscape {
            name: "dixon_price",
            function: dixon_price,
            lower: -10.0,
            upper: 10.0,
            dimensions: Dimensions::AtLeast(1),
            multimodal: false,
            known_minimum: |dim| vec![(dixon_price_minimizer(dim), 0.0)],
        },
        Landscape {
            name: "drop_wave",
            function: drop_wave,
            lower: -5.12,
            upper: 5.12,
            dimensions: Dimensions::Fixed(2),
            multimodal: true,
            known_minimum: |_| vec![(vec![0.0, 0.0], -1.0)],
        },
        Landscape {
            name: "eggholder",
            function: eggholder,
            lower: -512.0,
            upper: 512.0,
            dimensions: Dimensions::Fixed(2),
            multimodal: true,
            known_minimum: |_| vec![(vec![512.0, 404.2319], -959.6407)],
        },
        Landscape {
            name: "gramacy_lee",
            function: gramacy_lee,
            lower: 0.5,
            upper: 2.5,
            dimensions: Dimensions::Fixed(1),
            multimodal: true,
            known_minimum: |_| vec![(vec![0.548563444114526], -0.869011134989500)],
        },
        Landscape {
            name: "griewank",
            function: griewank,
            lower: -600.0,
            upper: 600.0,
            dimensions: Dimensions::AtLeast(1),
            multimodal: true,
            known_minimum: at_origin,
        },
        Landscape {
            name: "holder_table",
            function: holder_table,
            lower: -10.0,
            upper: 10.0,
            dimensions: Dimensions::Fixed(2),
            multimodal: true,
            known_minimum: |_| {
                let (a, b) = (8.05502, 9.66459);
                vec![
                    (vec![a, b], -19.2085),
                    (vec![-a, b], -19.2085),
                    (vec![a, -b], -19.2085),
                    (vec![-a, -b], -19.2085),
                ]
            },
        },
        Landscape {
            name: "levy",
            function: levy,
            lower: -10.0,
            upper: 10.0,
            dimensions: Dimensions::AtLeast(1),
            multimodal: true,
            known_minimum: at_ones,
        },
        Landscape {
            name: "levy_n13",
            function: levy_n13,
            lower: -10.0,
            upper: 10.0,
            dimensions: Dimensions::Fixed(2),
            multimodal: true,
            known_minimum: at_ones,
        },
        Landscape {
            name: "matyas",
            function: matyas,
            lower: -10.0,
            upper: 10.0,
            dimensions: Dimensions::Fixed(2),
            multimodal: false,
            known_minimum: at_origin,
        },
        Landscape {
            name: "mccormick",
            function: mccormick,
            lower: -3.0,
            upper: 4.0,
            dimensions: Dimensions::Fixed(2),
            multimodal: true,
            known_minimum: |_| vec![(vec![-0.54719, -1.54719], -1.913223)],
        },
        Landscape {
            name: "rastrigin",
            function: rastrigin,
            lower: -5.12,
            upper: 5.12,
            dimensions: Dimensions::AtLeast(1),
            multimodal: true,
            known_minimum: at_origin,
        },
        Landscape {
            name: "rosenbrock",
            function: rosenbrock,
            lower: -5.0,
            upper: 10.0,
            dimensions: Dimensions::AtLeast(2),
            multimodal: false,
            known_minimum: at_ones,
        },
        Landscape {
            name: "schaffer_n2",
            function: schaffer_n2,
            lower: -100.0,
            upper: 100.0,
            dimensions: Dimensions::Fixed(2),
            multimodal: true,
            known_minimum: at_origin,
        },
        Landscape {
            name: "schaffer_n4",
            function: schaffer_n4,
            lower: -100.0,
            upper: 100.0,
            dimensions: Dimensions::Fixed(2),
            multimodal: true,
            known_minimum: |_| {
                let m = 1.25313;
                vec![
                    (vec![0.0, m], 0.292579),
                    (vec![0.0, -m], 0.292579),
                    (vec![m, 0.0], 0.292579),
                    (vec![-m, 0.0], 0.292579),
                ]
            },
        },
        Landscape {
            name: "schwefel",
            function: schwefel,
            lower: -500.0,
            upper: 500.0,
            dimensions: Dimensions::AtLeast(1),
            multimodal: true,
            known_minimum: |dim| vec![(vec![420.9687; dim], 0.0)],
        },
        Landscape {
            name: "shubert",
            function: shubert,
            lower: -10.0,
            upper: 10.0,
            dimensions: Dimensions::Fixed(2),
            multimodal: true,
            // 18 minimizers, only the value is catalogued
            known_minimum: |_| Vec::new(),
        },
        Landscape {
            name: "six_hump_camel",
            function: six_hump_camel,
            lower: -3.0,
            upper: 3.0,
            dimensions: Dimensions::Fixed(2),
            multimodal: true,
            known_minimum: |_| {
                vec![
                    (vec![0.0898, -0.7126], -1.0316),
                    (vec![-0.0898, 0.7126], -1.0316),
                ]
            },
        },
        Landscape {
            name: "three_hump_camel",
            function: three_hump_camel,
            lower: -5.0,
            upper: 5.0,
            dimensions: Dimensions::Fixed(2),
            multimodal: false,
            known_minimum: at_origin,
        },
        Landscape {
            name: "zakharov",
            function: zakharov,
            lower: -5.0,
            upper: 10.0,
            dimensions: Dimensions::AtLeast(1),
            multimodal: false,
            known_minimum: at_origin,
        },
    ]
}

/// Look up a landscape by name
/// Returns None if the name is not in the catalog
pub fn get_landscape(name: &str) -> Option<Landscape> {
    let wanted = name.to_ascii_lowercase().replace('-', "_");
    landscapes().into_iter().find(|l| l.name == wanted)
}

/// Names of every landscape in the catalog
pub fn landscape_names() -> Vec<&'static str> {
    landscapes().iter().map(|l| l.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_all_landscapes() {
        assert_eq!(landscapes().len(), 23);
        let names = landscape_names();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_all_landscape_minima() {
        let loose_tolerance = 1e-3;

        for landscape in landscapes() {
            let dims = match landscape.dimensions {
                Dimensions::Fixed(d) => vec![d],
                Dimensions::AtLeast(d) => vec![d.max(2), 5],
            };
            for dim in dims {
                for (location, expected) in (landscape.known_minimum)(dim) {
                    assert_eq!(location.len(), dim, "{}: wrong minimizer length", landscape.name);
                    let x = Array1::from_vec(location.clone());
                    let actual = landscape.evaluate(&x);
                    let error = (actual - expected).abs();
                    let tolerance = if expected.abs() > 1.0 {
                        loose_tolerance * expected.abs()
                    } else {
                        loose_tolerance
                    };
                    println!(
                        "  {} at {:?}: expected {:.6}, got {:.6}, error {:.2e}",
                        landscape.name, location, expected, actual, error
                    );
                    assert!(
                        error <= tolerance,
                        "Landscape {} failed: at {:?}, expected {:.10}, got {:.10}",
                        landscape.name,
                        location,
                        expected,
                        actual
                    );
                }
            }
        }
    }

    #[test]
    fn test_exact_zero_minima() {
        let tolerance = 1e-10;

        let x = Array1::from_vec(vec![0.0, 0.0]);
        assert!(ackley(&x).abs() < tolerance);
        assert!(rastrigin(&x).abs() < tolerance);
        assert!(griewank(&x).abs() < tolerance);
        assert_eq!(matyas(&x), 0.0);
        assert_eq!(three_hump_camel(&x), 0.0);
        assert_eq!(zakharov(&x), 0.0);
        assert_eq!(schaffer_n2(&x), 0.0);

        let x = Array1::from_vec(vec![1.0, 1.0]);
        assert_eq!(rosenbrock(&x), 0.0);
        assert!(levy(&x).abs() < tolerance);
        assert!(levy_n13(&x).abs() < tolerance);

        let x = Array1::from_vec(vec![-10.0, 1.0]);
        assert_eq!(bukin_n6(&x), 0.0);
    }

    #[test]
    fn test_specific_challenging_landscapes() {
        let tolerance = 1e-5;

        let x = Array1::from_vec(vec![0.548563444114526]);
        let result = gramacy_lee(&x);
        assert!(
            (result - -0.869011134989500).abs() < tolerance,
            "Gramacy & Lee: got {}",
            result
        );

        let x = Array1::from_vec(vec![0.0, 1.25313]);
        let result = schaffer_n4(&x);
        assert!((result - 0.292579).abs() < tolerance, "Schaffer N.4: got {}", result);

        let x = Array1::from_vec(vec![1.34941, -1.34941]);
        let result = cross_in_tray(&x);
        assert!((result - -2.06261).abs() < tolerance, "Cross-in-tray: got {}", result);
    }

    #[test]
    fn test_lookup_and_dimensions() {
        let ackley = get_landscape("ackley").unwrap();
        assert!(ackley.accepts(1));
        assert!(ackley.accepts(30));

        let rosen = get_landscape("Rosenbrock").unwrap();
        assert!(!rosen.accepts(1));
        assert_eq!(rosen.dimensions.default_dim(), 2);

        let gramacy = get_landscape("gramacy-lee").unwrap();
        assert!(gramacy.accepts(1));
        assert!(!gramacy.accepts(2));
        assert_eq!(gramacy.dimensions.default_dim(), 1);

        assert!(get_landscape("sphere").is_none());
        assert_eq!(get_landscape("shubert").unwrap().minimum_value(2), None);
    }

    #[test]
    fn test_bounds_are_ordered() {
        for landscape in landscapes() {
            assert!(landscape.lower < landscape.upper, "{}", landscape.name);
        }
    }
}
