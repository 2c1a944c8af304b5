//! Reading problem descriptions and writing results as plain text.
//!
//! # Input format
//! Input files are read line by line; only the leading whitespace-separated
//! fields of each line are used, so anything after them is a comment.
//! ```text
//! 2.0                       # mass
//! -2.0 2.0 1999             # xmin xmax npoint
//! 1 5                       # first and last state
//! linear                    # interpolation method: linear, cspline, polynomial
//! 2                         # number of potential samples (not checked)
//! -2.0 0.0                  # x V
//! 2.0 0.0
//! ```
//! Blank lines among the potential samples are skipped.
//!
//! # Output files
//! [`write_output`] creates four files of whitespace-separated columns:
//! - `potential.dat`: x, V
//! - `energies.dat`: E
//! - `wavefuncs.dat`: x, ψ₁, ψ₂, ...
//! - `expvalues.dat`: ⟨x⟩, σₓ

use std::{
    fs,
    io::{ BufRead, BufReader, BufWriter, Write },
    path::Path,
    str::FromStr,
};
use ndarray as nd;
use crate::{
    error::{ InputError, OutputError },
    interp::Method,
    solve::{ ProblemSpec, ResultBundle },
};

pub type InputResult<T> = Result<T, InputError>;

/// File name for the resampled potential.
pub const POTENTIAL_FILE: &str = "potential.dat";
/// File name for the energies.
pub const ENERGIES_FILE: &str = "energies.dat";
/// File name for the wavefunctions.
pub const WAVEFUNCS_FILE: &str = "wavefuncs.dat";
/// File name for the position expectation values and uncertainties.
pub const EXPVALUES_FILE: &str = "expvalues.dat";

// parse the `col`-th field of a (one-based) line
fn field<T: FromStr>(
    lines: &[String],
    line: usize,
    col: usize,
    what: &'static str,
) -> InputResult<T>
{
    let token
        = lines.get(line - 1)
        .and_then(|l| l.split_whitespace().nth(col))
        .ok_or(InputError::Missing { line, what })?;
    token.parse()
        .map_err(|_| InputError::Parse { line, what, token: token.to_string() })
}

/// Parse a problem description from any buffered reader.
///
/// The returned [`ProblemSpec`] is not yet [validated][ProblemSpec::validate];
/// only field presence and numeric syntax are checked here.
pub fn parse_input<R: BufRead>(reader: R) -> InputResult<ProblemSpec> {
    let lines: Vec<String> = reader.lines().collect::<Result<_, _>>()?;
    let mass: f64 = field(&lines, 1, 0, "mass")?;
    let xmin: f64 = field(&lines, 2, 0, "xmin")?;
    let xmax: f64 = field(&lines, 2, 1, "xmax")?;
    let npoint: usize = field(&lines, 2, 2, "npoint")?;
    let first_state: usize = field(&lines, 3, 0, "first state")?;
    let last_state: usize = field(&lines, 3, 1, "last state")?;
    let method_name: String = field(&lines, 4, 0, "interpolation method")?;
    let method: Method = method_name.parse()?;

    let mut data_x: Vec<f64> = Vec::new();
    let mut data_v: Vec<f64> = Vec::new();
    for (k, l) in lines.iter().enumerate().skip(5) {
        if l.trim().is_empty() { continue; }
        data_x.push(field(&lines, k + 1, 0, "sample coordinate")?);
        data_v.push(field(&lines, k + 1, 1, "sample potential value")?);
    }
    log::debug!(
        "io::parse_input: mass = {}, grid = [{}, {}] x {}, states {}..={}, \
        method = {}, {} samples",
        mass, xmin, xmax, npoint, first_state, last_state, method,
        data_x.len(),
    );
    Ok(ProblemSpec {
        mass,
        xmin,
        xmax,
        npoint,
        first_state,
        last_state,
        method,
        data_x: nd::Array1::from(data_x),
        data_v: nd::Array1::from(data_v),
    })
}

/// Read a problem description from a file.
pub fn read_input<P: AsRef<Path>>(path: P) -> InputResult<ProblemSpec> {
    let path = path.as_ref();
    let file
        = fs::File::open(path)
        .map_err(|source| InputError::Open { path: path.to_path_buf(), source })?;
    parse_input(BufReader::new(file))
}

/// Format a number in the style of C's `%.18e`.
pub fn fmt_sci(x: f64) -> String {
    let s = format!("{:.18e}", x);
    match s.split_once('e') {
        Some((mant, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mant, sign, exp.abs())
        },
        None => s,
    }
}

/// Write equal-length columns of numbers as whitespace-separated text, one
/// row per line.
///
/// *Panics if the columns have unequal lengths*.
pub fn write_columns<W: Write>(mut writer: W, columns: &[nd::ArrayView1<f64>])
    -> std::io::Result<()>
{
    let nrows = columns.first().map(|col| col.len()).unwrap_or(0);
    assert!(
        columns.iter().all(|col| col.len() == nrows),
        "io::write_columns: columns must have equal length",
    );
    for i in 0..nrows {
        let row: Vec<String>
            = columns.iter().map(|col| fmt_sci(col[i])).collect();
        writeln!(writer, "{}", row.join(" "))?;
    }
    writer.flush()
}

fn write_file(path: &Path, columns: &[nd::ArrayView1<f64>])
    -> Result<(), OutputError>
{
    fs::File::create(path)
        .map(BufWriter::new)
        .and_then(|writer| write_columns(writer, columns))
        .map_err(|source| OutputError { path: path.to_path_buf(), source })
}

/// Write all results to the four output files in the directory `outdir`,
/// which must already exist.
pub fn write_output<P: AsRef<Path>>(outdir: P, res: &ResultBundle)
    -> Result<(), OutputError>
{
    let outdir = outdir.as_ref();
    let x = res.get_x().view();
    let pot = res.get_potential();
    write_file(&outdir.join(POTENTIAL_FILE), &[x, pot.get_V().view()])?;
    write_file(&outdir.join(ENERGIES_FILE), &[res.get_energies().view()])?;
    let wfs = res.get_wavefunctions();
    let wf_columns: Vec<nd::ArrayView1<f64>>
        = std::iter::once(x).chain(wfs.columns()).collect();
    write_file(&outdir.join(WAVEFUNCS_FILE), &wf_columns)?;
    let means: nd::Array1<f64>
        = res.get_observables().iter().map(|obs| obs.mean).collect();
    let sigmas: nd::Array1<f64>
        = res.get_observables().iter().map(|obs| obs.sigma).collect();
    write_file(&outdir.join(EXPVALUES_FILE), &[means.view(), sigmas.view()])?;
    log::debug!("io::write_output: wrote results to {}", outdir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    const INPUT: &str = "\
2.0                       # mass
-2.0 2.0 1999             # xmin xmax npoint
1 5                       # first and last state
linear                    # interpolation method
2                         # number of potential samples
-2.0 0.0
2.0 0.0

";

    #[test]
    fn parse_well_formed_input() {
        let problem = parse_input(INPUT.as_bytes()).unwrap();
        assert_eq!(problem.mass, 2.0);
        assert_eq!((problem.xmin, problem.xmax, problem.npoint), (-2.0, 2.0, 1999));
        assert_eq!((problem.first_state, problem.last_state), (1, 5));
        assert_eq!(problem.method, Method::Linear);
        assert_eq!(problem.data_x, nd::array![-2.0, 2.0]);
        assert_eq!(problem.data_v, nd::array![0.0, 0.0]);
        assert!(problem.validate().is_ok());
    }

    #[test]
    fn unknown_method_is_a_configuration_error() {
        let input = INPUT.replace("linear ", "quintic ");
        assert!(matches!(
            parse_input(input.as_bytes()),
            Err(InputError::Config(ConfigError::UnknownMethod(name))) if name == "quintic"
        ));
    }

    #[test]
    fn malformed_fields_are_located() {
        let input = INPUT.replace("-2.0 2.0 1999", "-2.0 2.0 many");
        assert!(matches!(
            parse_input(input.as_bytes()),
            Err(InputError::Parse { line: 2, what: "npoint", .. }),
        ));
        let input = INPUT.replace("1 5 ", "1 ");
        assert!(matches!(
            parse_input(input.as_bytes()),
            Err(InputError::Parse { line: 3, what: "last state", .. }),
        ));
        let input = INPUT.replace("1 5                       # first and last state", "1");
        assert!(matches!(
            parse_input(input.as_bytes()),
            Err(InputError::Missing { line: 3, what: "last state" }),
        ));
        let input = format!("{}0.5\n", INPUT);
        assert!(matches!(
            parse_input(input.as_bytes()),
            Err(InputError::Missing { line: 9, .. }),
        ));
        assert!(matches!(
            parse_input("".as_bytes()),
            Err(InputError::Missing { line: 1, what: "mass" }),
        ));
    }

    #[test]
    fn non_finite_samples_parse_but_do_not_validate() {
        let input = INPUT.replace("\n2.0 0.0\n", "\n2.0 nan\n");
        let problem = parse_input(input.as_bytes()).unwrap();
        assert!(problem.data_v[1].is_nan());
        assert!(matches!(
            problem.validate(),
            Err(ConfigError::NonFiniteSample(1)),
        ));
        let input = INPUT.replace("-2.0 0.0\n", "-inf 0.0\n");
        let problem = parse_input(input.as_bytes()).unwrap();
        assert!(matches!(
            problem.validate(),
            Err(ConfigError::NonFiniteSample(0)),
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            read_input("/nonexistent/schrodinger.inp"),
            Err(InputError::Open { .. }),
        ));
    }

    #[test]
    fn scientific_format() {
        assert_eq!(fmt_sci(1.0), "1.000000000000000000e+00");
        assert_eq!(fmt_sci(-0.0009765625), "-9.765625000000000000e-04");
        assert_eq!(fmt_sci(1536.0), "1.536000000000000000e+03");
        assert_eq!(fmt_sci(f64::NAN), "NaN");
    }

    #[test]
    fn columns_are_written_row_by_row() {
        let a = nd::array![1.0, 2.0];
        let b = nd::array![-3.0, 4.5];
        let mut buf: Vec<u8> = Vec::new();
        write_columns(&mut buf, &[a.view(), b.view()]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let rows: Vec<Vec<f64>>
            = text.lines()
            .map(|l| l.split_whitespace().map(|t| t.parse().unwrap()).collect())
            .collect();
        assert_eq!(rows, vec![vec![1.0, -3.0], vec![2.0, 4.5]]);
    }
}
