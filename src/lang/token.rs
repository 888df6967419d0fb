use std::collections::HashMap;

thread_local!(
    static TOKENS: TokenSet = TokenSet::build();
);

/// Control tokens whose ids fall out of the table layout.
/// `tests` below verify these against the built table.
pub const TOKEN_STR: u16 = 0x80;
pub const TOKEN_DOLLAR: u16 = 0x81;
pub const TOKEN_END: u16 = 0xC0;
pub const TOKEN_SH1: u16 = 0xC1;
pub const TOKEN_SH2: u16 = 0xC2;
pub const TOKEN_DEC: u16 = 0xC3;
pub const TOKEN_REMARK: u16 = 0xCD;

/// Structure marker parsed from a `NAME:+` or `NAME:-` suffix at build
/// time. Marks block-opening and block-closing keywords; informational
/// only, the codec never branches on it.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Marker {
    None,
    Open,
    Close,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    id: u16,
    name: String,
    marker: Marker,
}

impl Token {
    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn marker(&self) -> Marker {
        self.marker
    }

    /// Padding slots occupy an id but have no name.
    pub fn is_filler(&self) -> bool {
        self.name.is_empty()
    }

    pub fn from_name(s: &str) -> Option<Token> {
        TOKENS.with(|tt| tt.by_name(s).cloned())
    }

    pub fn from_id(id: u16) -> Option<Token> {
        TOKENS.with(|tt| tt.by_id(id).cloned())
    }

    /// Contiguous run of tokens starting at `start`, ending at the first
    /// unassigned id. Introspection only.
    pub fn range(start: u16) -> Vec<Token> {
        TOKENS.with(|tt| {
            let mut tokens = vec![];
            let mut id = start;
            while let Some(token) = tt.by_id(id) {
                tokens.push(token.clone());
                id += 1;
            }
            tokens
        })
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

struct TokenSet {
    by_id: HashMap<u16, Token>,
    by_name: HashMap<String, u16>,
    next_id: u16,
}

impl TokenSet {
    fn new() -> TokenSet {
        TokenSet {
            by_id: HashMap::new(),
            by_name: HashMap::new(),
            next_id: 0,
        }
    }

    fn by_id(&self, id: u16) -> Option<&Token> {
        self.by_id.get(&id)
    }

    fn by_name(&self, name: &str) -> Option<&Token> {
        let name = name.trim().to_ascii_lowercase();
        self.by_name.get(&name).and_then(|id| self.by_id.get(id))
    }

    /// Assigns ids sequentially from `start`, or continuing from the
    /// previous block when `start` is `None`. With `pad`, unnamed filler
    /// slots are assigned up to `start + pad`. Panics on a duplicate id
    /// or name; the table text below is fixed at build time.
    fn add(&mut self, start: Option<u16>, names: &str, pad: Option<u16>) {
        if let Some(start) = start {
            self.next_id = start;
        }
        let start = self.next_id;
        for word in names.split_whitespace() {
            self.insert(self.next_id, word);
            self.next_id += 1;
        }
        if let Some(pad) = pad {
            while self.next_id < start + pad {
                self.insert(self.next_id, "");
                self.next_id += 1;
            }
        }
    }

    fn insert(&mut self, id: u16, word: &str) {
        let (name, marker) = match word.split_once(':') {
            Some((name, suffix)) if !name.is_empty() => {
                let marker = match suffix {
                    "+" => Marker::Open,
                    "-" => Marker::Close,
                    _ => panic!("bad marker suffix {:?}", word),
                };
                (name, marker)
            }
            _ => (word, Marker::None),
        };
        let name = name.to_ascii_lowercase();
        assert!(!self.by_id.contains_key(&id), "duplicate id {:#04x}", id);
        if !name.is_empty() {
            assert!(!self.by_name.contains_key(&name), "duplicate {}", name);
            self.by_name.insert(name.clone(), id);
        }
        self.by_id.insert(id, Token { id, name, marker });
    }

    fn build() -> TokenSet {
        let mut tt = TokenSet::new();
        //
        // Binary operators, $20-$3F.
        //
        tt.add(
            Some(0x20),
            "
            +    -    *    /    >>   <<   %    \\
            &    |    ^    >    >=   <    <=   <>
            =
            ",
            None,
        );
        //
        // Unary functions and keywords, $80 padded to 48 slots.
        //
        tt.add(
            Some(0x80),
            "
            !!STR    $        (        RAND(    RND(     JOYPAD(  INT(     TIME(
            EVENT(   INKEY$(  ASC(     CHR$(    POINT(   LEN(     ABS(     SGN(
            HIT(     SPOINT(  MID$(    LEFT$(   RIGHT$(  TRUE     FALSE    INSTR(
            MOUSE(   !!UN6    !!UN7    KEY(     PEEK(    DEEK(    ALLOC(   MAX(
            MIN(
            ",
            Some(48),
        );
        //
        // Structure keywords, width 16.
        //
        tt.add(
            None,
            "
            WHILE:+  WEND:-    IF:+    ENDIF:-    DO:+    LOOP:-    REPEAT:+  UNTIL:-
            PROC:+   ENDPROC:- FOR:+   NEXT:-     CASE:+  ENDCASE:- !!UN1:+   THEN:-
            ",
            Some(16),
        );
        //
        // Major keywords, including the control tokens.
        //
        tt.add(
            None,
            "
            !!END    !!SH1    !!SH2    !!DEC    TO       LET      PRINT    INPUT
            SYS      EXIT     ,        ;        :        '        )        READ
            DATA     ELSE     WHEN     DOWNTO   POKE     DOKE     LOCAL    CALL
            #        .        LINE     RECT     MOVE     PLOT     ELLIPSE  TEXT
            IMAGE    SPRITE   FROM     [        ]        @        TILEDRAW REF
            ",
            None,
        );
        //
        // Minor keywords, $180.
        //
        tt.add(
            Some(0x180),
            "
            CLEAR    NEW      RUN      STOP      END       ASSERT    LIST     SAVE
            LOAD     CAT      GOSUB    GOTO      RETURN    RESTORE   DIM      FKEY
            CLS      INK      FRAME    SOLID     BY        WHO       PALETTE  DRAW
            HIDE     FLIP     SOUND    SFX       ANCHOR    GLOAD     DEFCHR   LEFT
            RIGHT    FORWARD  TURTLE   CLOSE     TILEMAP   PENUP     PENDOWN  FAST
            HOME     LOCALE   CURSOR   RENUMBER  DELETE    EDIT      MON      OLD
            ON       ERROR    PIN      OUTPUT    WAIT      IWRITE    ANALOG   ISEND
            SSEND    IRECEIVE SRECEIVE ITRANSMIT STRANSMIT OPEN      LIBRARY
            USEND    URECEIVE UTRANSMIT UCONFIG  MOS       MOUSE     SHOW     NOISE
            ",
            None,
        );
        //
        // Assembler mnemonics, $280 padded to $50 slots.
        //
        tt.add(
            Some(0x280),
            "
            ADC  AND  ASL  BCC  BCS  BEQ  BIT  BMI  BNE  BPL  BRA  BRK  BVC  BVS
            CLC  CLD  CLI  CLV  CMP  CPX  CPY  DEC  DEX  DEY  EOR  INC  INX  INY
            JMP  JSR  LDA  LDX  LDY  LSR  NOP  ORA  PHA  PHP  PHX  PHY  PLA  PLP
            PLX  PLY  ROL  ROR  RTI  RTS  SBC  SEC  SED  SEI  STA  STX  STY  STZ
            TAX  TAY  TRB  TSB  TSX  TXA  TXS  TYA
            ",
            Some(0x50),
        );
        //
        // Additional unary functions, $2D0.
        //
        tt.add(
            Some(0x2D0),
            "
            ATAN2(   EOF(     !!UU2    !!UU3     !!UU4    !!UU5      !!UU6    !!UU7
            !!UU8    !!UU9    !!UU10   !!UU11    !!UU12   !!UU13     !!UU14   !!UU15
            SIN(     COS(     TAN(     ATAN(     LOG(     EXP(       VAL(     STR$(
            ISVAL(   SQR(     PAGE     SPRITEX(  SPRITEY( NOTES(     HIMEM    VBLANKS(
            ERR      ERL      PIN(     IREAD(    ANALOG(  JOYCOUNT(  UPPER$(
            IDEVICE( SPC(     TAB(     UHASDATA( MOS(     HAVEMOUSE( LOWER$(  POW(
            EXISTS(
            ",
            None,
        );
        tt
    }
}
