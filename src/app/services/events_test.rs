use super::*;

fn input(key: Key) -> Input {
    Input {
        key,
        ..Default::default()
    }
}

#[test]
fn test_map_ctrl_keys() {
    let quit = Input {
        key: Key::Char('q'),
        ctrl: true,
        ..Default::default()
    };
    assert!(matches!(map_input(quit), Some(Event::Quit)));

    let interrupt = Input {
        key: Key::Char('c'),
        ctrl: true,
        ..Default::default()
    };
    assert!(matches!(map_input(interrupt), Some(Event::Quit)));

    let home = Input {
        key: Key::Char('a'),
        ctrl: true,
        ..Default::default()
    };
    assert!(matches!(map_input(home), Some(Event::KeyboardCharInput(_))));
}

#[test]
fn test_map_navigation_keys() {
    assert!(matches!(map_input(input(Key::Enter)), Some(Event::KeyboardEnter)));
    assert!(matches!(map_input(input(Key::Esc)), Some(Event::KeyboardEsc)));
    assert!(matches!(map_input(input(Key::Tab)), Some(Event::KeyboardTab)));
    assert!(matches!(map_input(input(Key::F(1))), Some(Event::KeyboardF1)));
    assert!(matches!(map_input(input(Key::Up)), Some(Event::UiScrollUp)));
    assert!(matches!(map_input(input(Key::Down)), Some(Event::UiScrollDown)));

    let back_tab = Input {
        key: Key::Tab,
        shift: true,
        ..Default::default()
    };
    assert!(matches!(map_input(back_tab), Some(Event::KeyboardBackTab)));
}

#[test]
fn test_map_plain_chars() {
    assert!(matches!(
        map_input(input(Key::Char('e'))),
        Some(Event::KeyboardCharInput(Input { key: Key::Char('e'), .. }))
    ));
    assert!(map_input(input(Key::Null)).is_none());
}
