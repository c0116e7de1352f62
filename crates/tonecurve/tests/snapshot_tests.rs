//! Snapshot tests for encoded curves and integer LUTs using insta.

use tonecurve::{ControlPoint, CurveLut, CurvePointSet};

fn format_table(lut: &CurveLut) -> String {
    lut.table()
        .iter()
        .map(|v| format!("{:.4}", v))
        .collect::<Vec<_>>()
        .join(",")
}

#[test]
fn snapshot_identity_encoding() {
    insta::assert_snapshot!(CurvePointSet::default().to_string(), @"0,0;1,1;");
}

#[test]
fn snapshot_edited_encoding() -> Result<(), Box<dyn std::error::Error>> {
    let mut curve = CurvePointSet::default();
    curve.insert(ControlPoint::new(0.25, 0.125))?;
    curve.insert(ControlPoint::new(0.75, 0.875))?;
    curve.insert(ControlPoint::new(0.75, 0.9))?;
    curve.remove(0)?;
    insta::assert_snapshot!(curve.to_string(), @"0.25,0.125;0.75,0.875;0.7501,0.9;1,1;");
    Ok(())
}

#[test]
fn snapshot_two_point_lut() -> Result<(), Box<dyn std::error::Error>> {
    let mut curve: CurvePointSet = "0,0;1,0.5;".parse()?;
    let lut = CurveLut::generate(&mut curve, 5)?;
    insta::assert_snapshot!(format_table(&lut), @"0.0000,0.1250,0.2500,0.3750,0.5000");
    Ok(())
}

#[test]
fn snapshot_collinear_lut() -> Result<(), Box<dyn std::error::Error>> {
    let mut curve: CurvePointSet = "0,0;0.5,0.5;1,1;".parse()?;
    let lut = CurveLut::generate(&mut curve, 9)?;
    insta::assert_snapshot!(
        format_table(&lut),
        @"0.0000,0.1250,0.2500,0.3750,0.5000,0.6250,0.7500,0.8750,1.0000"
    );
    Ok(())
}

#[test]
fn snapshot_identity_u16_transfer() -> Result<(), Box<dyn std::error::Error>> {
    let lut = CurvePointSet::default().lut(5)?;
    let values = lut
        .to_u16()
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    insta::assert_snapshot!(values, @"0 16384 32768 49151 65535");
    Ok(())
}

#[test]
fn snapshot_constant_lut() -> Result<(), Box<dyn std::error::Error>> {
    let mut curve: CurvePointSet = "0.5,0.8;".parse()?;
    let lut = curve.lut(4)?;
    insta::assert_snapshot!(format_table(&lut), @"0.8000,0.8000,0.8000,0.8000");
    Ok(())
}
