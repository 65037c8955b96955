use super::*;

#[test]
fn next_mode_wraps() {
    let mut mode = DisplayMode::ComposeAndEffect;
    let mut seen = Vec::new();
    for _ in 0..4 {
        seen.push(mode);
        mode = mode.next();
    }
    assert_eq!(
        seen,
        vec![
            DisplayMode::ComposeAndEffect,
            DisplayMode::Fractal,
            DisplayMode::Reduce,
            DisplayMode::ComposeAndEffect,
        ]
    );
}

#[test]
fn defaults_start_dirty() {
    let s = PipelineState::default();
    assert!(s.dirty);
    assert_eq!(s.mode, DisplayMode::ComposeAndEffect);
    assert_eq!(s.effect, Effect::Identity);
    assert_eq!(s.reducer, Reducer::Threshold);
}

#[test]
fn selections_mark_dirty_but_mode_changes_do_not() {
    let mut s = PipelineState::default();
    s.dirty = false;
    s.apply(PipelineEvent::NextMode);
    s.apply(PipelineEvent::SetMode(DisplayMode::Reduce));
    assert!(!s.dirty);

    s.apply(PipelineEvent::SelectEffect(Effect::Blur));
    assert!(s.dirty);
    assert_eq!(s.effect, Effect::Blur);

    s.dirty = false;
    s.apply(PipelineEvent::SelectReducer(Reducer::Threshold));
    assert!(s.dirty, "re-selecting the active reducer still invalidates");
}

#[test]
fn layer_moves() {
    let mut s = PipelineState::default()
        .with_layer_offsets(vec![Offset::new(0, 0), Offset::new(10, 10)]);
    s.apply(PipelineEvent::MoveLayer {
        index: 1,
        dx: -8,
        dy: 8,
    });
    assert_eq!(s.layer_offset(1), Offset::new(2, 18));

    s.apply(PipelineEvent::MoveAllLayers { dx: 8, dy: 0 });
    assert_eq!(s.layer_offsets(), &[Offset::new(8, 0), Offset::new(10, 18)]);

    s.apply(PipelineEvent::SetLayerOffset {
        index: 0,
        offset: Offset::new(-5, 3),
    });
    assert_eq!(s.layer_offset(0), Offset::new(-5, 3));
}

#[test]
fn unknown_layer_index_is_ignored() {
    let mut s = PipelineState::default().with_layer_offsets(vec![Offset::new(1, 1)]);
    let before = s.clone();
    s.apply(PipelineEvent::MoveLayer {
        index: 3,
        dx: 8,
        dy: 8,
    });
    s.apply(PipelineEvent::SetLayerOffset {
        index: 9,
        offset: Offset::new(4, 4),
    });
    assert_eq!(s, before);
    assert_eq!(s.layer_offset(9), Offset::default());
}

#[test]
fn track_layers_only_grows() {
    let mut s = PipelineState::default().with_layer_offsets(vec![Offset::new(3, 3)]);
    s.track_layers(3);
    assert_eq!(s.layer_offsets().len(), 3);
    assert_eq!(s.layer_offset(0), Offset::new(3, 3));
    s.track_layers(1);
    assert_eq!(s.layer_offsets().len(), 3);
}

#[test]
fn effect_stages() {
    assert_eq!(
        Effect::Emboss.stage(),
        EffectStage::Convolve(KernelPreset::Emboss)
    );
    assert_eq!(Effect::Grayscale.stage(), EffectStage::Grayscale);
    assert_eq!(Effect::Identity.stage(), EffectStage::Copy);
}

#[test]
fn names_parse_back() {
    for mode in DisplayMode::ALL {
        assert_eq!(mode.name().parse::<DisplayMode>().unwrap(), mode);
    }
    for effect in Effect::ALL {
        assert_eq!(effect.name().parse::<Effect>().unwrap(), effect);
    }
    for reducer in Reducer::ALL {
        assert_eq!(reducer.name().parse::<Reducer>().unwrap(), reducer);
    }
    assert_eq!(
        "Error-Diffusion".parse::<Reducer>().unwrap(),
        Reducer::ErrorDiffusion
    );
}

#[test]
fn unknown_names_list_choices() {
    let err = "sepia".parse::<Effect>().unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("sepia"));
    assert!(msg.contains("emboss"));
}
