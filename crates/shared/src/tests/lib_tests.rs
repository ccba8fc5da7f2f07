use crate::{
    domain::{ConversionRecord, LengthUnit},
    error::{UnknownUnit, ValidationError},
    format::format_decimal,
};

#[test]
fn formats_whole_numbers_without_fraction() {
    assert_eq!(format_decimal(3.0), "3");
    assert_eq!(format_decimal(0.0), "0");
    assert_eq!(format_decimal(-0.0), "0");
}

#[test]
fn formats_to_two_decimals_dropping_trailing_zeros() {
    assert_eq!(format_decimal(3.14159), "3.14");
    assert_eq!(format_decimal(3.10), "3.1");
    assert_eq!(format_decimal(3.2808398950131235), "3.28");
}

#[test]
fn rounds_half_up_at_decimal_boundary() {
    assert_eq!(format_decimal(3.005), "3.01");
    assert_eq!(format_decimal(2.675), "2.68");
    assert_eq!(format_decimal(0.125), "0.13");
}

#[test]
fn carries_rounding_into_integer_part() {
    assert_eq!(format_decimal(0.999), "1");
    assert_eq!(format_decimal(9.996), "10");
    assert_eq!(format_decimal(99.995), "100");
}

#[test]
fn formats_negative_values_and_tiny_magnitudes() {
    assert_eq!(format_decimal(-1.235), "-1.24");
    assert_eq!(format_decimal(-0.001), "0");
    assert_eq!(format_decimal(0.0000001), "0");
}

#[test]
fn non_finite_values_render_as_is() {
    assert_eq!(format_decimal(f64::INFINITY), "inf");
    assert_eq!(format_decimal(f64::NAN), "NaN");
}

#[test]
fn parses_unit_names_case_insensitively() {
    assert_eq!("meters".parse::<LengthUnit>(), Ok(LengthUnit::Meters));
    assert_eq!(" Feet ".parse::<LengthUnit>(), Ok(LengthUnit::Feet));
    assert_eq!("INCHES".parse::<LengthUnit>(), Ok(LengthUnit::Inches));
    assert_eq!(
        "Centimeters".parse::<LengthUnit>(),
        Ok(LengthUnit::Centimeters)
    );
    assert_eq!(
        "yards".parse::<LengthUnit>(),
        Err(UnknownUnit("yards".to_string()))
    );
}

#[test]
fn unit_listing_keeps_picker_order() {
    let names: Vec<&str> = LengthUnit::ALL.iter().map(|u| u.name()).collect();
    assert_eq!(names, ["Meters", "Feet", "Inches", "Centimeters"]);
}

#[test]
fn record_serializes_with_stable_field_order() {
    let record = ConversionRecord::new(1.0, LengthUnit::Meters, 3.5, LengthUnit::Feet);
    let json = serde_json::to_string(&record).expect("encode");
    assert_eq!(
        json,
        r#"{"inputValue":1.0,"fromUnit":"Meters","convertedValue":3.5,"toUnit":"Feet"}"#
    );
}

#[test]
fn record_rejects_unknown_unit_names() {
    let raw = r#"{"inputValue":1.0,"fromUnit":"Yards","convertedValue":3.5,"toUnit":"Feet"}"#;
    assert!(serde_json::from_str::<ConversionRecord>(raw).is_err());
}

#[test]
fn history_line_shows_raw_input_and_rounded_result() {
    let record = ConversionRecord::new(
        1.0,
        LengthUnit::Meters,
        3.2808398950131235,
        LengthUnit::Feet,
    );
    assert_eq!(record.formatted(), "1.0 Meters = 3.28 Feet");

    let fractional = ConversionRecord::new(2.54321, LengthUnit::Inches, 6.459753, LengthUnit::Centimeters);
    assert_eq!(fractional.to_string(), "2.54321 Inches = 6.46 Centimeters");
}

#[test]
fn validation_errors_carry_user_notices() {
    assert_eq!(
        ValidationError::EmptyInput.user_message(),
        "Please enter a value to convert!"
    );
    assert_eq!(
        ValidationError::NotANumber.user_message(),
        "Please enter a valid number!"
    );
}
