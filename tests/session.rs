mod common;

#[cfg(test)]
mod tests {
    use myrtio_pixelstick::{
        Engine, EngineConfig, PostcardStore,
        session::{MAX_RESPONSE_LEN, SessionRequest},
    };

    use super::common::{MemBlobStore, MemFs, RecordingSink};

    type TestEngine = Engine<'static, MemFs, PostcardStore<MemBlobStore>, RecordingSink, 8>;

    fn engine() -> TestEngine {
        let config = EngineConfig {
            startup_sweep: false,
            ..EngineConfig::default()
        };
        Engine::new(
            MemFs::new(),
            PostcardStore::new(MemBlobStore::default()),
            RecordingSink::default(),
            config,
        )
    }

    const BLACK_COLOURS: &str = r#""colours":[[0,0,0],[0,0,0],[0,0,0],[0,0,0],[0,0,0]]"#;

    #[test]
    fn test_parse_requests() {
        assert_eq!(SessionRequest::parse("UI5"), SessionRequest::Update("I5"));
        assert_eq!(SessionRequest::parse("B"), SessionRequest::ListBitmaps);
        assert_eq!(SessionRequest::parse("C"), SessionRequest::BeginSync);
        assert_eq!(SessionRequest::parse("F"), SessionRequest::FixedPresets);
        assert_eq!(SessionRequest::parse("I"), SessionRequest::EndSync);
        assert_eq!(SessionRequest::parse("Q"), SessionRequest::Invalid("Q"));
    }

    #[test]
    fn test_config_snapshot_defaults() {
        let mut engine = engine();
        let response = engine.handle_request("C");

        assert!(engine.is_syncing());
        let expected_head = format!(
            r#"C{{"ledson":false,"mode":0,"brightness":36,"delay":3,"coloursused":1,"gradient":false,"interleave":false,{},"presetidx":0,"presets":[{{"name":"Pride"}},{{"name":"Rainbow"}},"#,
            BLACK_COLOURS
        );
        assert!(response.starts_with(&expected_head), "{}", response);
        assert!(response.ends_with(
            r#""rowtime":20,"bmpfile":"/bmp/pixelstick.bmp","apssid":"PixelStick","appw":"pixelstick"}"#
        ));
        assert!(response.contains(r#"{"name":"Colour Waves","paletteidx":0}"#));
        assert!(response.contains(
            r#"{"name":"Fire","parms":[{"name":"Cooling","values":[20,100,90]},{"name":"Sparking","values":[50,200,150]}]}"#
        ));
        assert!(response.contains(r#""palettes":["Rainbow","#));
        assert_eq!(response.matches(r#"{"name":"#).count(), 13 + 9);
    }

    #[test]
    fn test_config_snapshot_follows_commands() {
        let mut engine = engine();
        for command in ["1", "M1", "P6", "U150", "Q3", "I120"] {
            engine.apply(command);
        }
        let response = engine.handle_request("C");

        assert!(response.starts_with(r#"C{"ledson":true,"mode":1,"brightness":120,"#));
        assert!(response.contains(r#""presetidx":6,"#));
        assert!(response.contains(
            r#"{"name":"Sinelon","parms":[{"name":"Speed","values":[1,100,36]},{"name":"Fade","values":[1,255,50]}],"paletteidx":3}"#
        ));
    }

    #[test]
    fn test_config_snapshot_fits_longest_values() {
        let mut engine = engine();
        for command in [
            "J5",
            "R0255", "G0255", "B0255", "R1255", "G1255", "B1255", "R2255", "G2255", "B2255",
            "R3255", "G3255", "B3255", "R4255", "G4255", "B4255",
            "Aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa:bbbbbbbbbbbbbbbbbbbbbbbbbbb",
            "T4000000000",
        ] {
            engine.apply(command);
        }
        let response = engine.handle_request("C");

        assert!(response.starts_with("C{"));
        assert!(response.ends_with('}'));
        assert!(response.len() < MAX_RESPONSE_LEN);
    }

    #[test]
    fn test_fixed_presets_request() {
        let mut engine = engine();
        let response = engine.handle_request("F");

        assert!(!engine.is_syncing());
        let empty = format!(
            r#"{{"name":"Empty","coloursused":1,"gradient":false,"interleave":false,{}}}"#,
            BLACK_COLOURS
        );
        assert!(response.starts_with(&format!("F[{},", empty)), "{}", response);
        assert!(response.ends_with(&format!("{}]", empty)));
        assert_eq!(response.matches(r#"{"name":"#).count(), 8);

        for command in ["J2", "K1", "R0255", "O3Sunset"] {
            engine.apply(command);
        }
        let response = engine.handle_request("F");
        assert!(response.contains(
            r#"{"name":"Sunset","coloursused":2,"gradient":true,"interleave":false,"colours":[[255,0,0],[0,0,0],[0,0,0],[0,0,0],[0,0,0]]}"#
        ));
    }

    #[test]
    fn test_fixed_presets_fit_longest_values() {
        let mut engine = engine();
        for command in [
            "J5", "K1", "N1",
            "R0255", "G0255", "B0255", "R1255", "G1255", "B1255", "R2255", "G2255", "B2255",
            "R3255", "G3255", "B3255", "R4255", "G4255", "B4255",
        ] {
            engine.apply(command);
        }
        for slot in 0..8 {
            engine.apply(&format!("O{}Fifteen chars!!", slot));
        }
        let response = engine.handle_request("F");

        assert!(response.starts_with("F["));
        assert!(response.ends_with(']'));
        assert_eq!(response.matches(r#""name":"Fifteen chars!!""#).count(), 8);
    }
}
