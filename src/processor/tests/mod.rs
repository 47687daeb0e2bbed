//! Tests for the bulk load driver
//!
//! Exercises batching, order counting and error policies against
//! lineitem files written to temporary directories.

use std::fs;
use std::path::{Path, PathBuf};


pub const ORDER_ONE: [&str; 3] = [
    "1|155190|7706|1|17|21168.23|0.04|0.02|N|O|1996-03-13|1996-02-12|1996-03-22|DELIVER IN PERSON|TRUCK|egular courts above the",
    "1|67310|7311|2|36|45983.16|0.09|0.06|N|O|1996-04-12|1996-02-28|1996-04-20|TAKE BACK RETURN|MAIL|ly final dependencies: slyly bold",
    "1|63700|3701|3|8|13309.60|0.10|0.02|N|O|1996-01-29|1996-03-05|1996-01-31|TAKE BACK RETURN|REG AIR|riously. regular, express dep",
];

pub const ORDER_TWO: [&str; 1] = [
    "2|106170|1191|1|38|44694.46|0.00|0.05|N|O|1997-01-28|1997-01-14|1997-02-02|TAKE BACK RETURN|RAIL|ven requests. deposits breach a",
];

pub const ORDER_THREE: [&str; 2] = [
    "3|4297|1798|1|45|54058.05|0.06|0.00|R|F|1994-02-02|1994-01-04|1994-02-23|NONE|AIR|ongside of the furiously brave acco",
    "3|19036|6540|2|49|46796.47|0.10|0.00|R|F|1993-11-09|1993-12-20|1993-11-24|TAKE BACK RETURN|RAIL| unusual accounts. eve",
];

/// All six sample records in order
pub fn sample_records() -> Vec<&'static str> {
    ORDER_ONE
        .iter()
        .chain(ORDER_TWO.iter())
        .chain(ORDER_THREE.iter())
        .copied()
        .collect()
}

/// Write records as a lineitem file and return its path
pub fn write_lineitem_file(dir: &Path, name: &str, records: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut content = records.join("\n");
    content.push('\n');
    fs::write(&path, content).unwrap();
    path
}
