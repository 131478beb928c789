//! End-to-end tests for the level 4 surface: source text in, Python text
//! or a diagnostic out. Expected outputs are byte-exact.

use gradus::{compile, Command, CompileError, ErrorKind, MAX_LEVEL, MIN_LEVEL};

fn ok(source: &str) -> String {
    compile(source, 4).expect("program should compile").source
}

fn fail(source: &str) -> CompileError {
    compile(source, 4).expect_err("program should not compile")
}

//
// print
//

#[test]
fn print_single_quoted_text() {
    assert_eq!(ok("print 'hallo wereld!'"), "print(f'hallo wereld!')");
}

#[test]
fn print_double_quoted_text() {
    assert_eq!(ok("print \"hallo wereld!\""), "print(f'hallo wereld!')");
}

#[test]
fn print_line_with_spaces_works() {
    let compiled = compile("print 'hallo'\n      \nprint 'hallo'", 4).unwrap();
    assert_eq!(compiled.source, "print(f'hallo')\n\nprint(f'hallo')");
    assert_eq!(compiled.commands, vec![Command::Print, Command::Print]);
}

#[test]
fn print_single_quoted_text_with_inner_double_quote() {
    assert_eq!(ok("print 'quote is \"'"), "print(f'quote is \"')");
}

#[test]
fn print_double_quoted_text_with_inner_single_quote() {
    assert_eq!(ok("print \"It's me\""), "print(f'It\\'s me')");
}

#[test]
fn print_with_space_gives_invalid() {
    let err = fail(" print 'Hallo welkom bij Hedy!'");
    assert_eq!(err, CompileError::InvalidSpace { line: 1 });
}

#[test]
fn print_no_space() {
    assert_eq!(ok("print'hallo wereld!'"), "print(f'hallo wereld!')");
}

#[test]
fn print_comma_inside_quotes() {
    assert_eq!(ok("print 'Hi, I am Hedy'"), "print(f'Hi, I am Hedy')");
}

#[test]
fn print_slash() {
    assert_eq!(ok("print 'Yes/No'"), "print(f'Yes/No')");
}

#[test]
fn print_backslash() {
    assert_eq!(ok("print 'Yes\\No'"), "print(f'Yes\\\\No')");
}

#[test]
fn print_backslash_before_quote_stays_an_escape() {
    assert_eq!(ok("print \"a\\'b\""), "print(f'a\\'b')");
}

#[test]
fn print_with_backslash_at_end() {
    assert_eq!(ok("print 'Welcome to \\'"), "print(f'Welcome to \\\\')");
}

#[test]
fn print_with_spaces() {
    assert_eq!(ok("print        'hallo!'"), "print(f'hallo!')");
}

#[test]
fn print_asterisk() {
    assert_eq!(
        ok("print '*Jouw* favoriet is dus kleur'"),
        "print(f'*Jouw* favoriet is dus kleur')"
    );
}

#[test]
fn print_without_quotes_gives_unquoted_text() {
    let err = fail("print hallo wereld");
    assert_eq!(err, CompileError::UnquotedText { line: 1 });
}

#[test]
fn print_without_quotes_reports_line_number() {
    let err = fail("print 'eerst goed'\nprint hedy 123");
    assert_eq!(err, CompileError::UnquotedText { line: 2 });
}

#[test]
fn print_without_opening_quote_gives_error() {
    for q in ['\'', '"'] {
        let err = fail(&format!("print hedy 123{q}"));
        assert_eq!(err.kind(), ErrorKind::UnquotedText);
    }
}

#[test]
fn print_without_closing_quote_gives_error() {
    for q in ['\'', '"'] {
        let err = fail(&format!("print {q}hedy 123"));
        assert_eq!(err.kind(), ErrorKind::UnquotedText);
    }
}

#[test]
fn print_similar_var_gives_undefined() {
    let err = fail("werld is ask 'tegen wie zeggen we hallo?'\nprint hallo wereld");
    assert_eq!(
        err,
        CompileError::UndefinedVar {
            name: "wereld".to_string(),
            line: 2,
        }
    );
}

#[test]
fn print_quoted_var_reference_is_plain_text() {
    let source = "naam is 'Daan'\nwoord1 is zomerkamp\nprint 'naam' ' is naar het' 'woord1'";
    let expected =
        "naam = '\\'Daan\\''\nwoord1 = 'zomerkamp'\nprint(f'naam is naar hetwoord1')";
    assert_eq!(ok(source), expected);
}

#[test]
fn placeholder_gives_error() {
    let err = fail("print _Escape from the haunted house!_");
    assert_eq!(err.kind(), ErrorKind::CodePlaceholdersPresent);
}

//
// comments
//

#[test]
fn print_comment() {
    assert_eq!(
        ok("print 'Hallo welkom bij Hedy!' # This is a comment"),
        "print(f'Hallo welkom bij Hedy!')"
    );
}

#[test]
fn assign_comment_keeps_trailing_space() {
    assert_eq!(
        ok("test is \"Welkom bij Hedy\" # This is a comment"),
        "test = '\"Welkom bij Hedy\" '"
    );
}

//
// ask
//

#[test]
fn ask_single_quoted_text() {
    assert_eq!(
        ok("details is ask 'tell me more'"),
        "details = input(f'tell me more')"
    );
}

#[test]
fn ask_double_quoted_text() {
    assert_eq!(
        ok("details is ask \"tell me more\""),
        "details = input(f'tell me more')"
    );
}

#[test]
fn ask_single_quoted_text_with_inner_double_quote() {
    assert_eq!(
        ok("details is ask 'say \"no\"'"),
        "details = input(f'say \"no\"')"
    );
}

#[test]
fn ask_double_quoted_text_with_inner_single_quote() {
    assert_eq!(
        ok("details is ask \"say 'no'\""),
        "details = input(f'say \\'no\\'')"
    );
}

#[test]
fn ask_without_quotes_gives_error() {
    let err = fail("kleur is ask Hedy 123");
    assert_eq!(err.kind(), ErrorKind::UnquotedText);
}

#[test]
fn ask_text_without_quotes_gives_error() {
    let err = fail("antwoord is ask hallo wereld");
    assert_eq!(err.kind(), ErrorKind::UnquotedText);
}

#[test]
fn ask_without_closing_quote_gives_error() {
    for q in ['\'', '"'] {
        let err = fail(&format!("kleur is ask {q}Hedy 123"));
        assert_eq!(err.kind(), ErrorKind::UnquotedText);
    }
}

#[test]
fn ask_with_comma() {
    let source = "dieren is ask 'hond, kat, kangoeroe'\nprint dieren";
    let expected = "dieren = input(f'hond, kat, kangoeroe')\nprint(f'{dieren}')";
    assert_eq!(ok(source), expected);
}

#[test]
fn ask_es() {
    assert_eq!(
        ok("color is ask 'Cuál es tu color favorito?'"),
        "color = input(f'Cuál es tu color favorito?')"
    );
}

#[test]
fn ask_bengali_var() {
    let source = "রং is ask 'আপনার প্রিয় রং কি?'\nprint রং ' is আপনার প্রিয'";
    let expected = "রং = input(f'আপনার প্রিয় রং কি?')\nprint(f'{রং} is আপনার প্রিয')";
    assert_eq!(ok(source), expected);
}

#[test]
fn ask_list_random() {
    let source = "colors is orange, blue, green\nfavorite is ask 'Is your fav color ' colors at random";
    let expected = "colors = ['orange', 'blue', 'green']\nfavorite = input(f'Is your fav color {random.choice(colors)}')";
    assert_eq!(ok(source), expected);
}

#[test]
fn ask_list_access_index() {
    let source = "colors is orange, blue, green\nfavorite is ask 'Is your fav color ' colors at 1";
    let expected =
        "colors = ['orange', 'blue', 'green']\nfavorite = input(f'Is your fav color {colors[1-1]}')";
    assert_eq!(ok(source), expected);
}

#[test]
fn ask_string_var() {
    let source = "color is orange\nfavorite is ask 'Is your fav color ' color";
    let expected = "color = 'orange'\nfavorite = input(f'Is your fav color {color}')";
    assert_eq!(ok(source), expected);
}

#[test]
fn ask_integer_var() {
    let source = "number is 10\nfavorite is ask 'Is your fav number' number";
    let expected = "number = '10'\nfavorite = input(f'Is your fav number{number}')";
    assert_eq!(ok(source), expected);
}

//
// sleep
//

#[test]
fn sleep_without_argument() {
    assert_eq!(ok("sleep"), "time.sleep(1)");
}

#[test]
fn sleep_with_number() {
    assert_eq!(ok("sleep 2"), "time.sleep(2)");
}

#[test]
fn sleep_with_input_variable() {
    let source = "n is ask \"how long\"\nsleep n";
    let expected = "n = input(f'how long')\n\
                    try:\n  time.sleep(int(n))\n\
                    except ValueError:\n  raise Exception(f'sleep needs a number, got {n}')";
    assert_eq!(ok(source), expected);
}

//
// assign
//

#[test]
fn assign_print() {
    let source = "naam is Hedy\nprint 'ik heet' naam";
    let expected = "naam = 'Hedy'\nprint(f'ik heet{naam}')";
    assert_eq!(ok(source), expected);
}

#[test]
fn assign_underscore_name() {
    let source = "voor_naam is Hedy\nprint 'ik heet ' voor_naam";
    let expected = "voor_naam = 'Hedy'\nprint(f'ik heet {voor_naam}')";
    assert_eq!(ok(source), expected);
}

#[test]
fn assign_period() {
    assert_eq!(ok("period is ."), "period = '.'");
}

#[test]
fn assign_single_quoted_text() {
    assert_eq!(
        ok("message is 'Hello welcome to Hedy.'"),
        "message = '\\'Hello welcome to Hedy.\\''"
    );
}

#[test]
fn assign_double_quoted_text() {
    assert_eq!(
        ok("message is \"Hello welcome to Hedy.\""),
        "message = '\"Hello welcome to Hedy.\"'"
    );
}

#[test]
fn print_single_quoted_text_var() {
    let source = "naam is 'Hedy'\nprint 'ik heet ' naam";
    let expected = "naam = '\\'Hedy\\''\nprint(f'ik heet {naam}')";
    assert_eq!(ok(source), expected);
}

#[test]
fn print_double_quoted_text_var() {
    let source = "naam is \"Hedy\"\nprint 'ik heet ' naam";
    let expected = "naam = '\"Hedy\"'\nprint(f'ik heet {naam}')";
    assert_eq!(ok(source), expected);
}

#[test]
fn assign_print_chinese() {
    let source = "你世界 is 你好世界\nprint 你世界";
    let expected = "你世界 = '你好世界'\nprint(f'{你世界}')";
    assert_eq!(ok(source), expected);
}

//
// lists
//

#[test]
fn assign_list_and_print_at_random() {
    let source = "colors is orange, blue, green\nprint colors at random";
    let expected = "colors = ['orange', 'blue', 'green']\nprint(f'{random.choice(colors)}')";
    assert_eq!(ok(source), expected);
}

#[test]
fn assign_list_values_with_inner_single_quotes() {
    let source = "taart is 'appeltaart, choladetaart, kwarktaart'\nprint 'we bakken een ' taart at random";
    let expected = "taart = ['\\'appeltaart', 'choladetaart', 'kwarktaart\\'']\nprint(f'we bakken een {random.choice(taart)}')";
    assert_eq!(ok(source), expected);
}

#[test]
fn assign_list_values_with_inner_double_quotes() {
    let source = "taart is \"appeltaart, choladetaart, kwarktaart\"\nprint 'we bakken een ' taart at random";
    let expected = "taart = ['\"appeltaart', 'choladetaart', 'kwarktaart\"']\nprint(f'we bakken een {random.choice(taart)}')";
    assert_eq!(ok(source), expected);
}

#[test]
fn assign_list_with_single_quoted_values() {
    let source = "taart is 'appeltaart', 'choladetaart', 'kwarktaart'\nprint 'we bakken een' taart at random";
    let expected = "taart = ['\\'appeltaart\\'', '\\'choladetaart\\'', '\\'kwarktaart\\'']\nprint(f'we bakken een{random.choice(taart)}')";
    assert_eq!(ok(source), expected);
}

#[test]
fn add_ask_to_list() {
    let source = "color is ask 'what is your favorite color?'\ncolors is green, red, blue\nadd color to colors\nprint colors at random";
    let expected = "color = input(f'what is your favorite color?')\n\
                    colors = ['green', 'red', 'blue']\n\
                    colors.append(color)\n\
                    print(f'{random.choice(colors)}')";
    assert_eq!(ok(source), expected);
}

#[test]
fn remove_ask_from_list() {
    let source = "colors is green, red, blue\ncolor is ask 'what color to remove?'\nremove color from colors\nprint colors at random";
    let expected = "colors = ['green', 'red', 'blue']\n\
                    color = input(f'what color to remove?')\n\
                    try:\n  colors.remove(color)\nexcept:\n  pass\n\
                    print(f'{random.choice(colors)}')";
    assert_eq!(ok(source), expected);
}

#[test]
fn add_quoted_literal_to_list() {
    let source = "foods is pizza, pasta\nadd 'salad' to foods";
    let expected = "foods = ['pizza', 'pasta']\nfoods.append('\\'salad\\'')";
    assert_eq!(ok(source), expected);
}

//
// turtle
//

#[test]
fn forward_with_number() {
    assert_eq!(ok("forward 50"), "t.forward(50)");
}

#[test]
fn ask_forward() {
    let source = "afstand is ask 'hoe ver dan?'\nforward afstand";
    let expected = "afstand = input(f'hoe ver dan?')\n\
                    __trtl = afstand\n\
                    try:\n  __trtl = int(__trtl)\n\
                    except ValueError:\n  raise Exception(f'forward needs a number, got {__trtl}')\n\
                    t.forward(__trtl)";
    assert_eq!(ok(source), expected);
}

#[test]
fn clear() {
    let expected = "extensions.clear()\n\
                    try:\n    # If turtle is being used, reset canvas\n    \
                    t.hideturtle()\n    \
                    turtle.resetscreen()\n    \
                    t.left(90)\n    \
                    t.showturtle()\n\
                    except NameError:\n    pass";
    assert_eq!(ok("clear"), expected);
}

//
// negative
//

#[test]
fn var_undefined_error_message() {
    let err = fail("naam is Hedy\nprint 'ik heet ' name");
    assert_eq!(
        err,
        CompileError::UndefinedVar {
            name: "name".to_string(),
            line: 2,
        }
    );
}

#[test]
fn program_gives_parse_exception_at_start() {
    let err = fail("is Foobar\nprint welcome");
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert_eq!(err.line_number(), 1);
    assert_eq!(err.column(), Some(1));
    assert_eq!(err.fixed_code(), None);
}

#[test]
fn text_without_any_keyword_gives_missing_command() {
    let err = fail("competitie die gaan we winnen");
    assert_eq!(err, CompileError::MissingCommand { line: 1, level: 4 });
}

#[test]
fn repair_incorrect_print_argument() {
    let err = fail("print ,'Hello'");
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert_eq!(err.fixed_code(), Some("print 'Hello'"));
}

#[test]
fn lonely_text() {
    let err = fail("'Hello'");
    assert_eq!(err, CompileError::LonelyText { line: 1 });
}

//
// levels
//

#[test]
fn output_is_identical_across_unchanged_levels() {
    let source = "naam is 'Hedy'\ncolors is orange, blue, green\nprint 'ik heet ' naam\nprint colors at random";
    let baseline = compile(source, MIN_LEVEL).unwrap().source;
    for level in MIN_LEVEL..=MAX_LEVEL {
        assert_eq!(compile(source, level).unwrap().source, baseline);
    }
}

#[test]
fn later_levels_reserve_more_words() {
    // `repeat` is a fine variable name at level 4 and reserved at level 7.
    let source = "repeat is 5\nprint 'x'";
    assert!(compile(source, 4).is_ok());
    assert_eq!(
        compile(source, 7).unwrap_err().kind(),
        ErrorKind::Parse
    );
}

#[test]
#[should_panic(expected = "outside the supported range")]
fn out_of_range_level_is_a_contract_violation() {
    let _ = compile("print 'hi'", 99);
}
