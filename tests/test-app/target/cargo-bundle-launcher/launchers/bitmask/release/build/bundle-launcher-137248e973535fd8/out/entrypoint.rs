# [doc = r" Name of the program executed from the bundle's `lib` directory."] pub const ENTRYPOINT : & str = "bitmask" ; # [doc = r" Value given to the entrypoint as its argument zero."] pub const PROGRAM_NAME : & str = "bitmask" ;